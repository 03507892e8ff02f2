//! Local filesystem backends

pub mod manifest;

pub use manifest::FileManifestStorage;
