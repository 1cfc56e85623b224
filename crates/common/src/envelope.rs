//! The persisted ciphertext envelope.
//!
//! An envelope is stored as a single JSON text column:
//!
//! ```text
//! {"iv":"<32 hex>","ciphertext":"<hex>","authTag":"<32 hex>","algorithm":"aes-256-gcm"}
//! ```
//!
//! Fields are kept hex-encoded here. Decoding and length checks belong to the
//! cipher, which treats an empty field as missing.

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Algorithm identifier written into every envelope.
pub const ALGORITHM: &str = "aes-256-gcm";

/// Hex-encoded IV, ciphertext, and GCM tag plus the algorithm identifier.
///
/// Opaque outside the key that produced it. All of `iv`, `ciphertext` and
/// `auth_tag` must be present to decrypt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionEnvelope {
    /// Hex-encoded 16-byte IV.
    #[serde(default)]
    pub iv: String,
    /// Hex-encoded ciphertext, without the tag.
    #[serde(default)]
    pub ciphertext: String,
    /// Hex-encoded 16-byte authentication tag.
    #[serde(default, rename = "authTag")]
    pub auth_tag: String,
    /// Algorithm identifier. Rows written before the field existed default to
    /// [`ALGORITHM`].
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

fn default_algorithm() -> String {
    ALGORITHM.into()
}

impl EncryptionEnvelope {
    /// Serialise into the single-column storage form.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EnvelopeParse`] if serialisation fails, which
    /// does not happen for string-only fields in practice.
    pub fn to_json(&self) -> Result<String, CryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the single-column storage form.
    ///
    /// Missing `iv`/`ciphertext`/`authTag` parse as empty strings so the
    /// cipher can report them as a malformed envelope rather than a parse error.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EnvelopeParse`] if `s` is not a JSON object of
    /// string fields.
    pub fn from_json(s: &str) -> Result<Self, CryptoError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Names of the required hex fields that are empty, in wire spelling.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.iv.is_empty() {
            missing.push("iv");
        }
        if self.ciphertext.is_empty() {
            missing.push("ciphertext");
        }
        if self.auth_tag.is_empty() {
            missing.push("authTag");
        }
        missing
    }
}
