//! Named SQL query catalog

pub mod catalog;

pub use catalog::{FileQueryCatalog, QueryCatalog, ResolvedQueries};
