//! Core business logic for Relex.
//!
//! # Modules
//!
//! - [`export`] - Batch planning, page fetching and the export loop
//! - [`assemble`] - Nested documents and page payloads
//! - [`manifest`] - Page outcome entries and the ledger
//!
//! # Export Workflow
//!
//! For every page index of the selected batch:
//!
//! 1. **Skip check**: a page with a successful manifest entry is not touched
//! 2. **Fetch**: reports for the page plus their child rows
//! 3. **Assemble**: nest children under their reports
//! 4. **Upload**: one JSON array per page under a deterministic key
//! 5. **Record**: append the outcome to the manifest
//!
//! # Example
//!
//! ```rust,no_run
//! use relex::config::load_config;
//! use relex::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("relex.toml")?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let coordinator = ExportCoordinator::new(config, shutdown_rx).await?;
//! let summary = coordinator.run_export(None).await?;
//!
//! println!("Exported: {}", summary.pages_exported);
//! println!("Failed: {}", summary.pages_failed);
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod export;
pub mod manifest;
