//! Logging and observability
//!
//! Structured `tracing` events with a console layer and an optional rotated
//! JSON file layer. The macros below give the per-page observability points
//! one field layout so log queries can rely on it.
//!
//! # Example
//!
//! ```no_run
//! use relex::logging::init_logging;
//! use relex::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(batch_number = 1, "Batch started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a page that was uploaded and recorded
///
/// # Example
///
/// ```no_run
/// use relex::log_page_exported;
///
/// log_page_exported!(1, 0, "exports/export_batch1_page0.json", 1000, "e3b0c442");
/// ```
#[macro_export]
macro_rules! log_page_exported {
    ($batch:expr, $page_index:expr, $key:expr, $rows:expr, $checksum:expr) => {
        tracing::info!(
            batch_number = $batch,
            page_index = $page_index,
            destination_key = %$key,
            rows_exported = $rows,
            checksum = %$checksum,
            "Page exported"
        );
    };
}

/// Log a page that failed at fetch, assembly or upload
///
/// # Example
///
/// ```no_run
/// use relex::log_page_failed;
///
/// log_page_failed!(1, 3, "exports/export_batch1_page3.json", "connection reset");
/// ```
#[macro_export]
macro_rules! log_page_failed {
    ($batch:expr, $page_index:expr, $key:expr, $error:expr) => {
        tracing::error!(
            batch_number = $batch,
            page_index = $page_index,
            destination_key = %$key,
            error = %$error,
            "Page failed"
        );
    };
}

/// Log a page skipped because the manifest already holds a success for it
#[macro_export]
macro_rules! log_page_skipped {
    ($batch:expr, $page_index:expr) => {
        tracing::info!(
            batch_number = $batch,
            page_index = $page_index,
            "Page already exported, skipping"
        );
    };
}

/// Log a generated destination key
#[macro_export]
macro_rules! log_key_generated {
    ($batch:expr, $page_index:expr, $key:expr) => {
        tracing::debug!(
            batch_number = $batch,
            page_index = $page_index,
            destination_key = %$key,
            "Generated destination key"
        );
    };
}
