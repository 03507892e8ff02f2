//! Document assembly and payload encoding
//!
//! - [`document`] - Nest child rows under their parents
//! - [`payload`] - Serialize a page, count its items, checksum it

pub mod document;
pub mod payload;

pub use document::{assemble_document, assemble_page};
pub use payload::{count_json_array_items, encode_page, payload_checksum, EncodedPage};
