//! Export coordinator - main orchestrator for the export process
//!
//! Runs batches sequentially and pages within a batch in increasing page
//! index order. Each page is either skipped (already in the manifest),
//! exported, or recorded as failed; a failed page never stops the loop.

use crate::adapters::database::traits::{ManifestStorage, RowSource};
use crate::adapters::database::{create_destination, create_source_and_manifest};
use crate::adapters::storage::ObjectStorage;
use crate::config::{KeysetContinuity, PaginationMode, RelexConfig};
use crate::core::assemble::{assemble_page, encode_page, EncodedPage};
use crate::core::export::fetcher::{FetchedPage, PageFetcher, PageRequest};
use crate::core::export::planner::{plan_batch, PageRange};
use crate::core::export::summary::ExportSummary;
use crate::core::manifest::{ManifestEntry, ManifestLedger};
use crate::domain::ids::{BatchNumber, EntityId, ObjectKey};
use crate::domain::{RelexError, Result};
use crate::{log_key_generated, log_page_exported, log_page_failed, log_page_skipped};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Export coordinator
pub struct ExportCoordinator {
    config: RelexConfig,
    source: Arc<dyn RowSource + Send + Sync>,
    fetcher: PageFetcher,
    ledger: ManifestLedger,
    destination: Arc<dyn ObjectStorage + Send + Sync>,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator with backends built from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a query cannot be resolved, a connection test
    /// fails, or the destination cannot be created.
    pub async fn new(config: RelexConfig, shutdown_signal: watch::Receiver<bool>) -> Result<Self> {
        let (source, manifest) = create_source_and_manifest(&config).await?;
        let destination = create_destination(&config)?;

        tracing::debug!(source = %source.describe(), "Export backends ready");

        Ok(Self::from_parts(
            config,
            source,
            manifest,
            destination,
            shutdown_signal,
        ))
    }

    /// Create a coordinator over existing backends
    pub fn from_parts(
        config: RelexConfig,
        source: Arc<dyn RowSource + Send + Sync>,
        manifest: Arc<dyn ManifestStorage + Send + Sync>,
        destination: Arc<dyn ObjectStorage + Send + Sync>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            fetcher: PageFetcher::new(source.clone()),
            source,
            ledger: ManifestLedger::new(manifest),
            destination,
            shutdown_signal,
        }
    }

    /// Run one batch, or every configured batch in order
    ///
    /// # Errors
    ///
    /// Returns [`RelexError::Validation`] for a batch number outside
    /// `[1, batch_count]` before any page work, and propagates row count,
    /// cursor seek and manifest lookup failures. Per-page fetch, assembly
    /// and upload failures are recorded and counted instead.
    pub async fn run_export(&self, batch_number: Option<BatchNumber>) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let export = &self.config.export;
        let mut summary = ExportSummary {
            dry_run: self.config.is_dry_run(),
            ..ExportSummary::default()
        };

        if let Some(batch) = batch_number {
            batch
                .ensure_within(export.batch_count)
                .map_err(RelexError::Validation)?;
        }

        let total_rows = self.source.count_reports().await?;
        let planning_page_size = match export.pagination_mode {
            PaginationMode::Offset => export.page_size,
            PaginationMode::Keyset => 1,
        };

        tracing::info!(
            total_rows,
            page_size = export.page_size,
            batch_count = export.batch_count,
            mode = %export.pagination_mode,
            batch = ?batch_number.map(BatchNumber::get),
            dry_run = summary.dry_run,
            "Starting export"
        );

        let batches: Vec<BatchNumber> = match batch_number {
            Some(batch) => vec![batch],
            None => BatchNumber::all(export.batch_count).collect(),
        };
        let seek_each_batch =
            batch_number.is_some() || export.keyset_continuity == KeysetContinuity::Seek;

        let mut cursor: EntityId = 0;
        for batch in batches {
            if self.is_shutdown_requested() {
                summary.interrupted = true;
                break;
            }

            let range = plan_batch(total_rows, planning_page_size, export.batch_count, batch)?;
            tracing::info!(
                batch_number = batch.get(),
                first_page = range.start,
                last_page = ?range.last_index(),
                "Starting batch"
            );

            if export.pagination_mode == PaginationMode::Keyset && seek_each_batch {
                cursor = self.seek_cursor(range).await?;
            }

            summary.batches_run += 1;
            cursor = self.export_batch(batch, range, cursor, &mut summary).await?;

            if summary.interrupted {
                break;
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Keyset cursor that makes a batch start at its first planned entity
    async fn seek_cursor(&self, range: PageRange) -> Result<EntityId> {
        if range.start == 0 || range.is_empty() {
            return Ok(0);
        }
        let cursor = self.source.report_id_at(range.start - 1).await?;
        tracing::debug!(ordinal = range.start - 1, cursor = ?cursor, "Seeked keyset cursor");
        cursor.ok_or_else(|| {
            RelexError::Export(format!(
                "No report at ordinal {}; the table changed since it was counted",
                range.start - 1
            ))
        })
    }

    /// Process every page of one batch, returning the ending keyset cursor
    async fn export_batch(
        &self,
        batch: BatchNumber,
        range: PageRange,
        mut cursor: EntityId,
        summary: &mut ExportSummary,
    ) -> Result<EntityId> {
        let keyset = self.config.export.pagination_mode == PaginationMode::Keyset;

        for page_index in range.indexes() {
            if self.is_shutdown_requested() {
                tracing::info!(
                    batch_number = batch.get(),
                    page_index,
                    "Shutdown requested, stopping before next page"
                );
                summary.interrupted = true;
                break;
            }

            if let Some(done) = self.ledger.last_success(batch, page_index).await? {
                log_page_skipped!(batch.get(), page_index);
                summary.pages_skipped += 1;
                if keyset {
                    match done.entity_id {
                        Some(id) => cursor = id,
                        None => match self.source.next_report_id(cursor).await? {
                            Some(id) => cursor = id,
                            None => break,
                        },
                    }
                }
                continue;
            }

            let started_at = Utc::now();
            let request = if keyset {
                PageRequest::Keyset { last_id: cursor }
            } else {
                PageRequest::Offset {
                    page_index,
                    page_size: self.config.export.page_size,
                }
            };

            let page = match self.fetcher.fetch(request).await {
                Ok(page) => page,
                Err(e) => {
                    let key = self.key_for(batch, page_index, None);
                    self.record_failure(batch, page_index, &key, &e, started_at, summary)
                        .await;
                    if keyset {
                        // Later pages must start after the entity this page owns.
                        match self.source.next_report_id(cursor).await {
                            Ok(Some(id)) => cursor = id,
                            Ok(None) => break,
                            Err(e) => {
                                tracing::warn!(
                                    batch_number = batch.get(),
                                    page_index,
                                    error = %e,
                                    "Cannot step keyset cursor past failed page, ending batch"
                                );
                                break;
                            }
                        }
                    }
                    continue;
                }
            };

            if keyset && page.is_exhausted() {
                tracing::info!(
                    batch_number = batch.get(),
                    page_index,
                    cursor,
                    "No more reports after cursor, batch done"
                );
                break;
            }

            let entity_id = if keyset { page.entity_id() } else { None };
            let key = self.key_for(batch, page_index, entity_id);
            log_key_generated!(batch.get(), page_index, key);

            match self.write_page(&key, &page).await {
                Ok(encoded) => {
                    summary.pages_attempted += 1;
                    summary.pages_exported += 1;
                    summary.rows_exported += encoded.items;
                    log_page_exported!(batch.get(), page_index, key, encoded.items, encoded.checksum);

                    let entry = ManifestEntry::success(
                        batch,
                        page_index,
                        &key,
                        encoded.items,
                        entity_id,
                        started_at,
                    );
                    self.record(&entry, summary).await;
                }
                Err(e) => {
                    self.record_failure(batch, page_index, &key, &e, started_at, summary)
                        .await;
                }
            }

            if let Some(next) = page.next_cursor {
                cursor = next;
            }
        }

        Ok(cursor)
    }

    /// Assemble, encode and upload one fetched page
    async fn write_page(&self, key: &ObjectKey, page: &FetchedPage) -> Result<EncodedPage> {
        let documents = assemble_page(&page.reports, &page.children);
        let encoded = encode_page(&documents)?;

        if self.config.is_dry_run() {
            tracing::debug!(
                destination = %self.destination.location(key),
                bytes = encoded.body.len(),
                "Dry run, skipping upload"
            );
            return Ok(encoded);
        }

        self.destination.put(key, encoded.body.clone()).await?;
        Ok(encoded)
    }

    async fn record_failure(
        &self,
        batch: BatchNumber,
        page_index: u64,
        key: &ObjectKey,
        error: &RelexError,
        started_at: DateTime<Utc>,
        summary: &mut ExportSummary,
    ) {
        summary.pages_attempted += 1;
        summary.pages_failed += 1;
        log_page_failed!(batch.get(), page_index, key, error);

        let entry = ManifestEntry::failure(batch, page_index, key, error.to_string(), started_at);
        self.record(&entry, summary).await;
    }

    /// Append an entry; a failed append is counted, never raised
    async fn record(&self, entry: &ManifestEntry, summary: &mut ExportSummary) {
        if self.config.is_dry_run() {
            return;
        }
        if let Err(e) = self.ledger.append(entry).await {
            summary.manifest_failures += 1;
            tracing::error!(
                batch_number = entry.batch_number,
                page_index = entry.page_index,
                destination_key = %entry.destination_key,
                success = entry.success,
                error = %e,
                "Failed to record manifest entry"
            );
        }
    }

    fn key_for(&self, batch: BatchNumber, page_index: u64, entity_id: Option<EntityId>) -> ObjectKey {
        ObjectKey::for_page(&self.config.destination.prefix, batch, page_index, entity_id)
    }

    fn is_shutdown_requested(&self) -> bool {
        *self.shutdown_signal.borrow()
    }
}
