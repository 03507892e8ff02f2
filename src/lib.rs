// Relex - Resumable Relational Export to Object Storage
// Copyright (c) 2025 Relex Contributors
// Licensed under the MIT License

//! # Relex - resumable relational export
//!
//! Relex exports a table of reports, together with their articles, social
//! media profiles and profile details, as nested JSON documents to an object
//! store. One JSON array is written per page, and a manifest records the
//! outcome of every page so an interrupted or partially failed run can be
//! resumed without redoing finished pages.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Batch planning, page fetching, assembly and the export loop
//! - [`adapters`] - PostgreSQL, manifest backends, query catalog, object store
//! - [`domain`] - Rows, documents, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use relex::config::load_config;
//! use relex::core::export::ExportCoordinator;
//! use relex::domain::ids::BatchNumber;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("relex.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = ExportCoordinator::new(config, shutdown_rx).await?;
//!     let summary = coordinator.run_export(Some(BatchNumber::new(1)?)).await?;
//!
//!     println!("Exported {} rows", summary.rows_exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Batches and Resume
//!
//! The page space is split into `batch_count` contiguous ranges so separate
//! processes can each take one batch number. Within a batch, pages run in
//! order and every page is checked against the manifest first:
//!
//! ```rust
//! use relex::core::export::plan_batch;
//! use relex::domain::ids::BatchNumber;
//!
//! let range = plan_batch(2500, 1000, 2, BatchNumber::new(2).unwrap()).unwrap();
//! assert_eq!(range.indexes().collect::<Vec<_>>(), vec![2]);
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`] with [`domain::RelexError`].
//! Startup errors (configuration, query catalog, connection, batch range)
//! abort the run; fetch, assembly and upload errors only fail their page.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
