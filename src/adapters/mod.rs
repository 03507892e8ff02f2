//! External system integrations for Relex.
//!
//! - [`database`] - Row source and manifest storage traits, backend factory
//! - [`postgresql`] - PostgreSQL row source and manifest table
//! - [`local`] - JSON lines manifest file
//! - [`sql`] - Named query catalog
//! - [`storage`] - Object store destination
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the export core
//! can be driven by in-process doubles in tests:
//!
//! ```rust
//! use relex::adapters::storage::{ObjectStorage, ObjectStoreDestination};
//! use relex::domain::ids::{BatchNumber, ObjectKey};
//! use object_store::memory::InMemory;
//! use std::sync::Arc;
//!
//! # async fn example() -> relex::domain::Result<()> {
//! let destination = ObjectStoreDestination::from_store(Arc::new(InMemory::new()), "memory");
//! let key = ObjectKey::for_page("exports", BatchNumber::new(1).unwrap(), 0, None);
//! destination.put(&key, bytes::Bytes::from_static(b"[]")).await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod local;
pub mod postgresql;
pub mod sql;
pub mod storage;
