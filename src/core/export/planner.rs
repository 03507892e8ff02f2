//! Batch planning
//!
//! Splits the page space `[0, total_pages)` into `batch_count` contiguous
//! ranges so independent runs can each take one batch number.

use crate::domain::ids::BatchNumber;
use crate::domain::{RelexError, Result};
use std::ops::Range;

/// Contiguous range of 0-indexed pages owned by one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// First page index, inclusive
    pub start: u64,
    /// One past the last page index
    pub end: u64,
}

impl PageRange {
    /// Number of pages in the range
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Last page index, inclusive, or `None` for an empty range
    pub fn last_index(&self) -> Option<u64> {
        (!self.is_empty()).then(|| self.end - 1)
    }

    /// Iterate page indexes in increasing order
    pub fn indexes(&self) -> Range<u64> {
        self.start..self.end
    }
}

/// Compute the page range of one batch
///
/// `total_pages = ceil(total_rows / page_size)` and each batch takes
/// `ceil(total_pages / batch_count)` pages; trailing batches may be shorter
/// or empty.
///
/// # Errors
///
/// Returns [`RelexError::Validation`] for a zero page size, a zero batch
/// count, or a batch number above `batch_count`.
///
/// # Examples
///
/// ```
/// use relex::core::export::planner::plan_batch;
/// use relex::domain::ids::BatchNumber;
///
/// let first = plan_batch(2500, 1000, 2, BatchNumber::new(1).unwrap()).unwrap();
/// assert_eq!((first.start, first.last_index()), (0, Some(1)));
///
/// let second = plan_batch(2500, 1000, 2, BatchNumber::new(2).unwrap()).unwrap();
/// assert_eq!((second.start, second.last_index()), (2, Some(2)));
/// ```
pub fn plan_batch(
    total_rows: u64,
    page_size: u64,
    batch_count: u32,
    batch_number: BatchNumber,
) -> Result<PageRange> {
    if page_size == 0 {
        return Err(RelexError::Validation("page_size must be > 0".to_string()));
    }
    if batch_count == 0 {
        return Err(RelexError::Validation("batch_count must be > 0".to_string()));
    }
    batch_number
        .ensure_within(batch_count)
        .map_err(RelexError::Validation)?;

    let total_pages = total_rows.div_ceil(page_size);
    let pages_per_batch = total_pages.div_ceil(u64::from(batch_count));
    let batch = u64::from(batch_number.get());

    let end = (batch * pages_per_batch).min(total_pages);
    let start = ((batch - 1) * pages_per_batch).min(end);

    Ok(PageRange { start, end })
}
