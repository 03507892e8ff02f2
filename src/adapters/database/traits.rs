//! Database abstraction traits
//!
//! This module defines the traits that database adapters must implement
//! to work with Relex: a read-only row source for the exported tables and a
//! storage backend for the manifest ledger.

use crate::core::manifest::ManifestEntry;
use crate::domain::ids::{BatchNumber, EntityId};
use crate::domain::rows::{ArticleRow, DetailRow, ProfileRow, ReportRow};
use crate::domain::Result;
use async_trait::async_trait;

/// Row source trait for the exported record set
///
/// Every call checks out its own connection and releases it before
/// returning. Implementations hold no cursor state.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Test the database connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Count the parent rows available for export
    async fn count_reports(&self) -> Result<u64>;

    /// Fetch a window of parent rows ordered by identity
    ///
    /// # Arguments
    ///
    /// * `offset` - Number of rows to skip
    /// * `limit` - Maximum number of rows to return
    async fn fetch_reports_page(&self, offset: u64, limit: u64) -> Result<Vec<ReportRow>>;

    /// Fetch the first parent row whose identity is strictly greater than `last_id`
    ///
    /// Returns `Ok(None)` when the table is exhausted.
    async fn fetch_report_after(&self, last_id: EntityId) -> Result<Option<ReportRow>>;

    /// Resolve the identity at a 0-indexed ordinal position
    ///
    /// Used to seed the keyset cursor of a batch that runs on its own.
    async fn report_id_at(&self, ordinal: u64) -> Result<Option<EntityId>>;

    /// Fetch articles for the given reports
    async fn fetch_articles(&self, report_ids: &[EntityId]) -> Result<Vec<ArticleRow>>;

    /// Fetch social media profiles for the given reports
    async fn fetch_profiles(&self, report_ids: &[EntityId]) -> Result<Vec<ProfileRow>>;

    /// Fetch profile details for every profile of the given reports
    async fn fetch_profile_details(&self, report_ids: &[EntityId]) -> Result<Vec<DetailRow>>;

    /// Identity of the next parent row after `last_id`
    ///
    /// Used to advance the keyset cursor over a page that is skipped without
    /// a recorded entity id.
    async fn next_report_id(&self, last_id: EntityId) -> Result<Option<EntityId>> {
        Ok(self
            .fetch_report_after(last_id)
            .await?
            .map(|row| row.scoop_report_id))
    }

    /// Get a short description of the backend for logging
    fn describe(&self) -> String;
}

/// Manifest storage trait for page outcome persistence
///
/// Appends are additive: duplicate (batch number, page index) pairs are
/// history, never a conflict.
#[async_trait]
pub trait ManifestStorage: Send + Sync {
    /// Persist one entry
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be durably written.
    async fn append(&self, entry: &ManifestEntry) -> Result<()>;

    /// Load the most recent successful entry for a page
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(entry))` if the page was exported, `Ok(None)` if it
    /// never succeeded (failed entries are ignored).
    async fn last_success(
        &self,
        batch_number: BatchNumber,
        page_index: u64,
    ) -> Result<Option<ManifestEntry>>;

    /// Load every entry in insertion order
    async fn list_entries(&self) -> Result<Vec<ManifestEntry>>;
}
