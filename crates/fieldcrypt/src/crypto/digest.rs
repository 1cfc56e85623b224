//! One-way SHA-256 fingerprints for non-secret content (deduplication).
//!
//! Not a MAC. Anything that must prove origin goes through
//! [`integrity`](super::integrity).

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
