//! CLI command implementations

pub mod export;
pub mod status;
pub mod validate;
