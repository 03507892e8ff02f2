//! Manifest of page outcomes
//!
//! The manifest is the only durable state Relex keeps. Every attempted page
//! leaves an entry, and a page with a successful entry is skipped on the
//! next run.

pub mod entry;
pub mod ledger;

pub use entry::{summarize_by_batch, BatchProgress, ManifestEntry};
pub use ledger::ManifestLedger;
