//! Database abstraction layer
//!
//! This module provides a trait-based abstraction for the row source and the
//! manifest storage, plus factory functions that build them from configuration.

pub mod factory;
pub mod traits;

pub use factory::{
    create_destination, create_manifest_storage, create_source_and_manifest, resolve_queries,
};
pub use traits::{ManifestStorage, RowSource};
