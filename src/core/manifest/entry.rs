//! Manifest entry model
//!
//! One entry is written per attempted page. Entries are additive history: a
//! page that failed and later succeeded has two entries, and only successful
//! entries count when deciding whether a page is already done.

use crate::domain::ids::{BatchNumber, EntityId, ObjectKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome record for one (batch number, page index) unit of work
///
/// # Examples
///
/// ```
/// use relex::core::manifest::ManifestEntry;
/// use relex::domain::ids::{BatchNumber, ObjectKey};
/// use chrono::Utc;
///
/// let batch = BatchNumber::new(1).unwrap();
/// let key = ObjectKey::for_page("exports", batch, 0, None);
/// let entry = ManifestEntry::success(batch, 0, &key, 1000, None, Utc::now());
///
/// assert!(entry.success);
/// assert_eq!(entry.page_number, 1);
/// assert_eq!(entry.rows_exported, Some(1000));
/// assert!(entry.error_message.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManifestEntry {
    /// 1-indexed batch number
    pub batch_number: u32,

    /// 1-indexed page number, for display
    pub page_number: u64,

    /// 0-indexed page index, part of the identity
    pub page_index: u64,

    /// Key the page was (or would have been) written under
    pub destination_key: String,

    pub success: bool,

    /// Number of items in the uploaded array, success only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_exported: Option<u64>,

    /// Failure description, failure only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Entity exported by a keyset page, used to resume the cursor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<EntityId>,

    /// When processing of the page started
    pub created_at: DateTime<Utc>,

    /// When the outcome was recorded
    pub logged_at: DateTime<Utc>,
}

impl ManifestEntry {
    /// Build a successful entry
    pub fn success(
        batch_number: BatchNumber,
        page_index: u64,
        key: &ObjectKey,
        rows_exported: u64,
        entity_id: Option<EntityId>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            batch_number: batch_number.get(),
            page_number: page_index + 1,
            page_index,
            destination_key: key.as_str().to_string(),
            success: true,
            rows_exported: Some(rows_exported),
            error_message: None,
            entity_id,
            created_at: started_at,
            logged_at: Utc::now(),
        }
    }

    /// Build a failed entry
    ///
    /// `key` is the key the page would have been written under; keyset pages
    /// that fail before an entity is resolved carry the offset-style key.
    pub fn failure(
        batch_number: BatchNumber,
        page_index: u64,
        key: &ObjectKey,
        error_message: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            batch_number: batch_number.get(),
            page_number: page_index + 1,
            page_index,
            destination_key: key.as_str().to_string(),
            success: false,
            rows_exported: None,
            error_message: Some(error_message.into()),
            entity_id: None,
            created_at: started_at,
            logged_at: Utc::now(),
        }
    }

    /// Whether this entry belongs to the given (batch, page index) identity
    pub fn is_for(&self, batch_number: BatchNumber, page_index: u64) -> bool {
        self.batch_number == batch_number.get() && self.page_index == page_index
    }
}

/// Per-batch rollup of manifest history, used by the `status` command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchProgress {
    /// Distinct page indexes with at least one successful entry
    pub pages_done: u64,

    /// Distinct page indexes whose entries are all failures
    pub pages_failed: u64,

    /// Rows exported across the latest successful entry of each page
    pub rows_exported: u64,

    /// Total entries, including retries
    pub attempts: u64,
}

/// Roll manifest entries up by batch number
///
/// A page counts as done if any of its entries succeeded, and as failed only
/// when none did.
pub fn summarize_by_batch(entries: &[ManifestEntry]) -> BTreeMap<u32, BatchProgress> {
    let mut pages: BTreeMap<(u32, u64), (bool, u64, u64)> = BTreeMap::new();

    for entry in entries {
        let slot = pages
            .entry((entry.batch_number, entry.page_index))
            .or_insert((false, 0, 0));
        slot.2 += 1;
        if entry.success {
            slot.0 = true;
            slot.1 = entry.rows_exported.unwrap_or(0);
        }
    }

    let mut batches: BTreeMap<u32, BatchProgress> = BTreeMap::new();
    for ((batch_number, _), (done, rows, attempts)) in pages {
        let progress = batches.entry(batch_number).or_default();
        progress.attempts += attempts;
        if done {
            progress.pages_done += 1;
            progress.rows_exported += rows;
        } else {
            progress.pages_failed += 1;
        }
    }

    batches
}
