//! Domain models and types for Relex.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`BatchNumber`], [`ObjectKey`], [`EntityId`])
//! - **Source rows** ([`ReportRow`], [`ArticleRow`], [`ProfileRow`], [`DetailRow`])
//! - **Export documents** ([`ReportDocument`] and its nested shapes)
//! - **Error types** ([`RelexError`], [`QueryCatalogError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, RelexError>`]:
//!
//! ```rust
//! use relex::domain::{BatchNumber, RelexError, Result};
//!
//! fn parse_batch(raw: &str) -> Result<BatchNumber> {
//!     raw.parse().map_err(RelexError::Validation)
//! }
//!
//! assert!(parse_batch("2").is_ok());
//! assert!(parse_batch("0").is_err());
//! ```

pub mod document;
pub mod errors;
pub mod ids;
pub mod result;
pub mod rows;

// Re-export commonly used types for convenience
pub use document::{ArticleDocument, ProfileDetailDocument, ProfileDocument, ReportDocument};
pub use errors::{QueryCatalogError, RelexError};
pub use ids::{BatchNumber, EntityId, ObjectKey};
pub use result::Result;
pub use rows::{ArticleRow, ChildRows, DetailRow, ProfileRow, ReportRow};
