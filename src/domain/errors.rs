//! Domain error types
//!
//! This module defines the error hierarchy for Relex. All errors are
//! domain-specific and don't expose third-party types: adapters map driver,
//! pool and object store errors into string payloads at the boundary.

use thiserror::Error;

/// Main Relex error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum RelexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input validation errors (e.g. batch number out of range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Named query resolution errors
    #[error("Query catalog error: {0}")]
    QueryCatalog(#[from] QueryCatalogError),

    /// Row source query errors
    #[error("Database error: {0}")]
    Database(String),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Object storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Manifest ledger errors
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Malformed parent/child linkage while assembling a document
    #[error("Assembly error: {0}")]
    Assembly(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// The run was stopped by a shutdown signal
    #[error("Interrupted: {0}")]
    Interrupted(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl RelexError {
    /// Whether this error must abort the whole run rather than a single page
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RelexError::Configuration(_)
                | RelexError::Validation(_)
                | RelexError::QueryCatalog(_)
                | RelexError::Connection(_)
        )
    }

    /// Process exit code used when this error terminates the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            RelexError::Configuration(_)
            | RelexError::Validation(_)
            | RelexError::QueryCatalog(_) => 2,
            RelexError::Connection(_) => 4,
            RelexError::Interrupted(_) => 130,
            _ => 5,
        }
    }
}

/// Query catalog errors
///
/// A name that is not mapped and a mapped file that does not exist are
/// reported as distinct kinds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryCatalogError {
    /// The logical query name has no mapping
    #[error("Query '{0}' not found in configuration")]
    NotFound(String),

    /// The mapping exists but the underlying file does not
    #[error("Query file for '{name}' not found: {path}")]
    ResourceMissing { name: String, path: String },

    /// The file exists but could not be read
    #[error("Failed to read query '{name}': {message}")]
    Unreadable { name: String, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for RelexError {
    fn from(err: std::io::Error) -> Self {
        RelexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RelexError {
    fn from(err: serde_json::Error) -> Self {
        RelexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RelexError {
    fn from(err: toml::de::Error) -> Self {
        RelexError::Configuration(format!("TOML parse error: {err}"))
    }
}
