//! Export command implementation
//!
//! This module implements the export run: one batch when a batch number is
//! given, otherwise every configured batch in order.

use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use crate::domain::ids::BatchNumber;
use clap::Args;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Dry run mode - fetch and assemble pages without uploading or recording
    #[arg(long)]
    pub dry_run: bool,

    /// Batch number to run (1-indexed); all batches when omitted
    #[arg(value_name = "BATCH")]
    pub batch: Option<u32>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        let batch = match self.batch.map(BatchNumber::new).transpose() {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(error = %e, "Invalid batch number");
                eprintln!("Invalid batch number: {e}");
                return Ok(2);
            }
        };

        if config.is_dry_run() {
            tracing::info!("Dry run mode enabled - nothing will be uploaded or recorded");
            println!("DRY RUN MODE - nothing will be uploaded or recorded");
            println!();
        }

        let shutdown_timeout = Duration::from_secs(config.export.shutdown_timeout_secs);

        tracing::info!("Creating export coordinator");
        let coordinator = match ExportCoordinator::new(config, shutdown_signal.clone()).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("Starting export...");
        println!();

        let result = run_to_completion(
            coordinator.run_export(batch),
            shutdown_signal,
            shutdown_timeout,
        )
        .await;

        let summary = match result {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(e.exit_code());
            }
        };

        println!();
        println!("Export Summary:");
        println!("  Batches Run: {}", summary.batches_run);
        println!("  Pages Attempted: {}", summary.pages_attempted);
        println!("  Pages Exported: {}", summary.pages_exported);
        println!("  Pages Failed: {}", summary.pages_failed);
        println!("  Pages Skipped: {}", summary.pages_skipped);
        println!("  Rows Exported: {}", summary.rows_exported);
        if summary.manifest_failures > 0 {
            println!("  Unrecorded Outcomes: {}", summary.manifest_failures);
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        let exit_code = summary.exit_code();
        if summary.interrupted {
            println!("Export interrupted. Completed pages are recorded in the manifest.");
            println!("Run the same command to resume.");
        } else if summary.is_successful() {
            println!("Export completed successfully!");
        } else {
            println!("Export completed with failures; rerun to retry failed pages");
        }

        Ok(exit_code)
    }
}

/// Drive `run` to completion, warning once if it outlives the shutdown timeout
///
/// The run is never dropped; the page in flight finishes its upload and
/// manifest write.
async fn run_to_completion<F: Future>(
    run: F,
    shutdown_signal: watch::Receiver<bool>,
    timeout: Duration,
) -> F::Output {
    tokio::pin!(run);
    let deadline = shutdown_deadline(shutdown_signal, timeout);
    tokio::pin!(deadline);

    let mut warned = false;
    loop {
        tokio::select! {
            result = &mut run => return result,
            _ = &mut deadline, if !warned => {
                warned = true;
                tracing::warn!(
                    timeout_secs = timeout.as_secs(),
                    "In-flight page still running after the shutdown timeout, waiting for it to be recorded"
                );
                eprintln!("Waiting for the in-flight page to finish...");
            }
        }
    }
}

/// Resolves `timeout` after the shutdown signal flips to true
async fn shutdown_deadline(mut signal: watch::Receiver<bool>, timeout: Duration) {
    while !*signal.borrow_and_update() {
        if signal.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
    tokio::time::sleep(timeout).await;
}
