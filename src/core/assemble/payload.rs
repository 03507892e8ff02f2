//! Page payload encoding
//!
//! A page is uploaded as one JSON array. The row count recorded in the
//! manifest is derived from the encoded bytes, not from the input slice, so
//! the manifest describes exactly what was written.

use crate::domain::document::ReportDocument;
use crate::domain::{RelexError, Result};
use bytes::Bytes;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Encoded page ready for upload
#[derive(Debug, Clone)]
pub struct EncodedPage {
    pub body: Bytes,
    /// Number of items in the top-level array
    pub items: u64,
    /// Hex SHA-256 of `body`
    pub checksum: String,
}

/// Serialize documents into a JSON array payload
///
/// # Errors
///
/// Returns [`RelexError::Serialization`] if a document cannot be encoded.
pub fn encode_page(documents: &[ReportDocument]) -> Result<EncodedPage> {
    let body = serde_json::to_vec(documents)
        .map_err(|e| RelexError::Serialization(format!("Failed to encode page: {e}")))?;

    let items = count_json_array_items(&body);
    let checksum = payload_checksum(&body);

    Ok(EncodedPage {
        body: Bytes::from(body),
        items,
        checksum,
    })
}

/// Count the items of a top-level JSON array
///
/// Anything that is not a well-formed array counts as zero.
///
/// # Examples
///
/// ```
/// use relex::core::assemble::count_json_array_items;
///
/// assert_eq!(count_json_array_items(br#"[{"A":1},{"A":2}]"#), 2);
/// assert_eq!(count_json_array_items(b"{}"), 0);
/// assert_eq!(count_json_array_items(b"[1,"), 0);
/// ```
pub fn count_json_array_items(json: &[u8]) -> u64 {
    match serde_json::from_slice::<Value>(json) {
        Ok(Value::Array(items)) => items.len() as u64,
        Ok(_) => 0,
        Err(e) => {
            tracing::debug!(error = %e, "Payload is not valid JSON, counting zero items");
            0
        }
    }
}

/// Hex-encoded SHA-256 of a payload
pub fn payload_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}
