//! PostgreSQL manifest storage
//!
//! `insert_export_manifest` binds, in order: batch number, page number,
//! page index, destination key, success, rows exported, error message,
//! entity id, created at, logged at. `check_page_exported` binds the batch
//! number and page index and returns the latest successful row, if any.

use crate::adapters::database::traits::ManifestStorage;
use crate::adapters::postgresql::client::PostgresClient;
use crate::adapters::postgresql::models::manifest_entry_from_row;
use crate::adapters::sql::ResolvedQueries;
use crate::core::manifest::ManifestEntry;
use crate::domain::ids::BatchNumber;
use crate::domain::{RelexError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Manifest ledger table in PostgreSQL
pub struct PostgresManifestStorage {
    client: Arc<PostgresClient>,
    queries: Arc<ResolvedQueries>,
}

impl PostgresManifestStorage {
    pub fn new(client: Arc<PostgresClient>, queries: Arc<ResolvedQueries>) -> Self {
        Self { client, queries }
    }
}

fn manifest_error(context: &str, err: RelexError) -> RelexError {
    RelexError::Manifest(format!("{context}: {err}"))
}

fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| RelexError::Manifest(format!("{value} exceeds bigint")))
}

#[async_trait]
impl ManifestStorage for PostgresManifestStorage {
    async fn append(&self, entry: &ManifestEntry) -> Result<()> {
        let sql = self.queries.text("insert_export_manifest")?;

        let batch_number = i32::try_from(entry.batch_number)
            .map_err(|_| RelexError::Manifest(format!("{} exceeds int", entry.batch_number)))?;
        let page_number = to_i64(entry.page_number)?;
        let page_index = to_i64(entry.page_index)?;
        let rows_exported = entry.rows_exported.map(to_i64).transpose()?;

        self.client
            .execute(
                sql,
                &[
                    &batch_number,
                    &page_number,
                    &page_index,
                    &entry.destination_key,
                    &entry.success,
                    &rows_exported,
                    &entry.error_message,
                    &entry.entity_id,
                    &entry.created_at,
                    &entry.logged_at,
                ],
            )
            .await
            .map_err(|e| manifest_error("Failed to append manifest entry", e))?;

        Ok(())
    }

    async fn last_success(
        &self,
        batch_number: BatchNumber,
        page_index: u64,
    ) -> Result<Option<ManifestEntry>> {
        let sql = self.queries.text("check_page_exported")?;
        let batch = i32::try_from(batch_number.get())
            .map_err(|_| RelexError::Manifest(format!("{batch_number} exceeds int")))?;
        let page_index = to_i64(page_index)?;

        let row = self
            .client
            .query_opt(sql, &[&batch, &page_index])
            .await
            .map_err(|e| manifest_error("Failed to check manifest", e))?;

        row.as_ref()
            .map(manifest_entry_from_row)
            .transpose()
            .map(|entry| entry.filter(|e| e.success))
    }

    async fn list_entries(&self) -> Result<Vec<ManifestEntry>> {
        let sql = self.queries.text("list_export_manifest")?;
        let rows = self
            .client
            .query(sql, &[])
            .await
            .map_err(|e| manifest_error("Failed to list manifest", e))?;

        rows.iter().map(manifest_entry_from_row).collect()
    }
}
