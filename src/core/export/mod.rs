//! Export orchestration
//!
//! - [`planner`] - Split the page space into batches
//! - [`fetcher`] - Offset and keyset page fetches
//! - [`coordinator`] - Per-page state machine and batch loop
//! - [`summary`] - Run counters

pub mod coordinator;
pub mod fetcher;
pub mod planner;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use fetcher::{FetchedPage, PageFetcher, PageRequest};
pub use planner::{plan_batch, PageRange};
pub use summary::ExportSummary;
