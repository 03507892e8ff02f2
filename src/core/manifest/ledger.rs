//! Manifest ledger
//!
//! Thin wrapper over a [`ManifestStorage`] backend with the two questions the
//! export loop asks: "record this outcome" and "is this page already done".

use crate::adapters::database::traits::ManifestStorage;
use crate::core::manifest::entry::ManifestEntry;
use crate::domain::ids::BatchNumber;
use crate::domain::Result;
use std::sync::Arc;

/// Manifest ledger over a storage backend
#[derive(Clone)]
pub struct ManifestLedger {
    storage: Arc<dyn ManifestStorage + Send + Sync>,
}

impl ManifestLedger {
    /// Create a ledger over a storage backend
    pub fn new(storage: Arc<dyn ManifestStorage + Send + Sync>) -> Self {
        Self { storage }
    }

    /// Durably persist one entry
    ///
    /// Duplicate (batch number, page index) pairs are kept as history.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot write the entry.
    pub async fn append(&self, entry: &ManifestEntry) -> Result<()> {
        self.storage.append(entry).await
    }

    /// Whether at least one successful entry exists for the page
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    pub async fn was_page_exported(&self, batch_number: BatchNumber, page_index: u64) -> Result<bool> {
        Ok(self.last_success(batch_number, page_index).await?.is_some())
    }

    /// Most recent successful entry for the page, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    pub async fn last_success(
        &self,
        batch_number: BatchNumber,
        page_index: u64,
    ) -> Result<Option<ManifestEntry>> {
        self.storage.last_success(batch_number, page_index).await
    }

    /// Every entry in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub async fn entries(&self) -> Result<Vec<ManifestEntry>> {
        self.storage.list_entries().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::local::FileManifestStorage;
    use crate::domain::ids::ObjectKey;
    use chrono::Utc;

    fn ledger(dir: &tempfile::TempDir) -> ManifestLedger {
        let storage = FileManifestStorage::new(dir.path().join("manifest.jsonl")).unwrap();
        ManifestLedger::new(Arc::new(storage))
    }

    #[tokio::test]
    async fn test_failed_entry_does_not_mark_page_exported() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger(&dir);
        let batch = BatchNumber::new(1).unwrap();
        let key = ObjectKey::for_page("exports", batch, 0, None);

        ledger
            .append(&ManifestEntry::failure(batch, 0, &key, "timeout", Utc::now()))
            .await
            .unwrap();
        assert!(!ledger.was_page_exported(batch, 0).await.unwrap());

        ledger
            .append(&ManifestEntry::success(batch, 0, &key, 10, None, Utc::now()))
            .await
            .unwrap();
        assert!(ledger.was_page_exported(batch, 0).await.unwrap());
        assert_eq!(ledger.entries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_success_is_history() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger(&dir);
        let batch = BatchNumber::new(2).unwrap();
        let key = ObjectKey::for_page("", batch, 4, Some(77));

        for rows in [1, 1] {
            ledger
                .append(&ManifestEntry::success(batch, 4, &key, rows, Some(77), Utc::now()))
                .await
                .unwrap();
        }

        let last = ledger.last_success(batch, 4).await.unwrap().unwrap();
        assert_eq!(last.entity_id, Some(77));
        assert_eq!(ledger.entries().await.unwrap().len(), 2);
        assert!(!ledger.was_page_exported(batch, 5).await.unwrap());
        assert!(!ledger
            .was_page_exported(BatchNumber::new(1).unwrap(), 4)
            .await
            .unwrap());
    }
}
