//! PostgreSQL integration
//!
//! Row source for the exported tables and the manifest ledger table, sharing
//! one pooled client when both live in the same database.

pub mod client;
pub mod ledger;
pub mod models;
pub mod source;

pub use client::{PoolSettings, PostgresClient};
pub use ledger::PostgresManifestStorage;
pub use source::PostgresRowSource;
