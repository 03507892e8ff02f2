//! Domain identifier types with validation
//!
//! Newtype wrappers for batch numbers and destination keys. The key format
//! is part of the external contract: operators reconcile uploads against the
//! manifest by key, so it must be a pure function of its inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a parent entity (report) in the source table
pub type EntityId = i32;

/// 1-indexed batch number
///
/// # Examples
///
/// ```
/// use relex::domain::ids::BatchNumber;
///
/// let batch = BatchNumber::new(2).unwrap();
/// assert_eq!(batch.get(), 2);
/// assert!(BatchNumber::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BatchNumber(u32);

impl BatchNumber {
    /// Creates a new BatchNumber, rejecting zero
    pub fn new(number: u32) -> Result<Self, String> {
        if number == 0 {
            return Err("Batch number must be >= 1".to_string());
        }
        Ok(Self(number))
    }

    /// Returns the batch number as an integer
    pub fn get(self) -> u32 {
        self.0
    }

    /// Checks that this batch number lies within `[1, batch_count]`
    pub fn ensure_within(self, batch_count: u32) -> Result<(), String> {
        if self.0 > batch_count {
            return Err(format!(
                "Batch number {} is out of range [1, {}]",
                self.0, batch_count
            ));
        }
        Ok(())
    }

    /// Iterates over every batch number in `[1, batch_count]`
    pub fn all(batch_count: u32) -> impl Iterator<Item = BatchNumber> {
        (1..=batch_count).map(BatchNumber)
    }
}

impl fmt::Display for BatchNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BatchNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid batch number '{s}'"))?;
        Self::new(number)
    }
}

/// Deterministic destination key of one page
///
/// Format: `export_batch<B>_page<P>.json` for offset pages and
/// `export_batch<B>_page<P>_id<EntityId>.json` for keyset pages, optionally
/// under a `/`-separated prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Builds the key for a page
    ///
    /// # Examples
    ///
    /// ```
    /// use relex::domain::ids::{BatchNumber, ObjectKey};
    ///
    /// let batch = BatchNumber::new(1).unwrap();
    /// let key = ObjectKey::for_page("exports", batch, 3, None);
    /// assert_eq!(key.as_str(), "exports/export_batch1_page3.json");
    ///
    /// let key = ObjectKey::for_page("", batch, 3, Some(42));
    /// assert_eq!(key.as_str(), "export_batch1_page3_id42.json");
    /// ```
    pub fn for_page(
        prefix: &str,
        batch_number: BatchNumber,
        page_index: u64,
        entity_id: Option<EntityId>,
    ) -> Self {
        let file_name = match entity_id {
            Some(id) => format!("export_batch{batch_number}_page{page_index}_id{id}.json"),
            None => format!("export_batch{batch_number}_page{page_index}.json"),
        };

        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            Self(file_name)
        } else {
            Self(format!("{prefix}/{file_name}"))
        }
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_number_zero_fails() {
        assert!(BatchNumber::new(0).is_err());
    }

    #[test]
    fn test_batch_number_from_str() {
        assert_eq!(BatchNumber::from_str("3").unwrap().get(), 3);
        assert_eq!(BatchNumber::from_str(" 7 ").unwrap().get(), 7);
        assert!(BatchNumber::from_str("abc").is_err());
        assert!(BatchNumber::from_str("-1").is_err());
        assert!(BatchNumber::from_str("0").is_err());
    }

    #[test]
    fn test_batch_number_range_check() {
        let batch = BatchNumber::new(3).unwrap();
        assert!(batch.ensure_within(3).is_ok());
        assert!(batch.ensure_within(5).is_ok());

        let err = batch.ensure_within(2).unwrap_err();
        assert!(err.contains("out of range [1, 2]"));
    }

    #[test]
    fn test_batch_number_all() {
        let numbers: Vec<u32> = BatchNumber::all(3).map(BatchNumber::get).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(BatchNumber::all(0).count(), 0);
    }

    #[test]
    fn test_offset_key_format() {
        let batch = BatchNumber::new(2).unwrap();
        let key = ObjectKey::for_page("", batch, 0, None);
        assert_eq!(key.as_str(), "export_batch2_page0.json");
    }

    #[test]
    fn test_keyset_key_format() {
        let batch = BatchNumber::new(1).unwrap();
        let key = ObjectKey::for_page("", batch, 5, Some(20));
        assert_eq!(key.as_str(), "export_batch1_page5_id20.json");
    }

    #[test]
    fn test_key_prefix_is_normalized() {
        let batch = BatchNumber::new(1).unwrap();
        assert_eq!(
            ObjectKey::for_page("/exports/", batch, 1, None).as_str(),
            "exports/export_batch1_page1.json"
        );
        assert_eq!(
            ObjectKey::for_page("a/b", batch, 1, None).as_str(),
            "a/b/export_batch1_page1.json"
        );
    }

    #[test]
    fn test_key_is_deterministic() {
        let batch = BatchNumber::new(4).unwrap();
        assert_eq!(
            ObjectKey::for_page("x", batch, 9, Some(11)),
            ObjectKey::for_page("x", batch, 9, Some(11))
        );
    }
}
