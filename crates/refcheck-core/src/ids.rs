//! Content-derived identifiers

use sha2::{Digest, Sha256};

/// Length of the truncated hex digest used as an id.
const ID_LEN: usize = 12;

/// Derive a stable identifier from an item's text and its location string.
///
/// The same (text, location) pair always yields the same id, so re-running a
/// phase on unchanged input reproduces the identifier set exactly.
pub(crate) fn content_id(text: &str, location: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(b"_");
    hasher.update(location.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..ID_LEN].to_string()
}
