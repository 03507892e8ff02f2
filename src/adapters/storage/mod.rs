//! Object storage for exported pages

pub mod destination;

pub use destination::{ObjectStorage, ObjectStoreDestination};
