//! Export summary and reporting
//!
//! This module defines the counters collected over one run.

use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSummary {
    /// Batches whose page loop was entered
    pub batches_run: u32,

    /// Pages that reached the fetch step
    pub pages_attempted: u64,

    /// Pages uploaded (or assembled, in a dry run)
    pub pages_exported: u64,

    /// Pages recorded as failed
    pub pages_failed: u64,

    /// Pages skipped because the manifest already holds a success
    pub pages_skipped: u64,

    /// Items written across all exported pages
    pub rows_exported: u64,

    /// Manifest appends that failed; the page outcome may be unrecorded
    pub manifest_failures: u64,

    /// The run stopped early on a shutdown signal
    pub interrupted: bool,

    pub dry_run: bool,

    pub duration: Duration,
}

impl ExportSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether every attempted page was exported and recorded
    pub fn is_successful(&self) -> bool {
        self.pages_failed == 0 && self.manifest_failures == 0 && !self.interrupted
    }

    /// Share of attempted pages that were exported, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_attempted == 0 {
            return 100.0;
        }
        (self.pages_exported as f64 / self.pages_attempted as f64) * 100.0
    }

    /// Process exit code for this outcome
    ///
    /// Reflects whether the loop ran to completion. Failed pages are reported
    /// through the manifest and the log, not the exit code.
    pub fn exit_code(&self) -> i32 {
        if self.interrupted {
            130
        } else {
            0
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            batches_run = self.batches_run,
            pages_attempted = self.pages_attempted,
            pages_exported = self.pages_exported,
            pages_failed = self.pages_failed,
            pages_skipped = self.pages_skipped,
            rows_exported = self.rows_exported,
            dry_run = self.dry_run,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export completed"
        );

        if self.pages_failed > 0 {
            tracing::warn!(
                pages_failed = self.pages_failed,
                "Some pages failed and are recorded in the manifest; rerun to retry them"
            );
        }

        if self.manifest_failures > 0 {
            tracing::warn!(
                manifest_failures = self.manifest_failures,
                "Some page outcomes could not be recorded; uploaded objects may be missing from the manifest"
            );
        }

        if self.interrupted {
            tracing::warn!("Export was interrupted before all pages were processed");
        }
    }
}
