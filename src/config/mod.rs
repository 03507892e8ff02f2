//! Configuration management for Relex.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Relex uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `RELEX_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation of every section on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use relex::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("relex.toml")?;
//!
//! println!("Destination: {}", config.destination.url);
//! println!("Page size: {}", config.export.page_size);
//! println!("Batches: {}", config.export.batch_count);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry run
//! - [`SourceConfig`] - Row source connection and pool
//! - [`ExportConfig`] - Page size, batch count, pagination mode
//! - [`DestinationConfig`] - Object store URL, key prefix, region
//! - [`ManifestConfig`] - Manifest ledger backend
//! - [`QueriesConfig`] - Named SQL files
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [source]
//! connection_string = "${RELEX_SOURCE_DSN}"
//!
//! [export]
//! page_size = 1000
//! batch_count = 4
//! pagination_mode = "offset"
//!
//! [destination]
//! url = "s3://reports-archive"
//! prefix = "exports"
//! region = "us-east-1"
//!
//! [manifest]
//! backend = "postgresql"
//!
//! [queries]
//! base_path = "./sql"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, DestinationConfig, ExportConfig, KeysetContinuity, LoggingConfig,
    ManifestBackend, ManifestConfig, PaginationMode, QueriesConfig, RelexConfig, SourceConfig,
    REQUIRED_QUERIES,
};
pub use secret::{redacted_dsn, secret_string, SecretString, SecretValue};
