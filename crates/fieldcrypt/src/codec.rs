//! [`FieldCodec`]: encrypt and decrypt nullable string attributes for storage.
//!
//! The write path fails loudly. The read path has two forms:
//! [`FieldCodec::try_decrypt_field`] reports every failure, and
//! [`FieldCodec::decrypt_field`] logs the failure and yields `None` so one
//! corrupted row does not fault a whole read. That is the only place in the
//! crate where an error is swallowed.

use std::sync::Arc;

use fieldcrypt_common::{CryptoError, EncryptionEnvelope};
use tracing::warn;

use crate::crypto::cipher;
use crate::key::MasterKey;

/// Encrypts and decrypts sensitive attributes under one master key.
///
/// Cheap to clone; the key is shared.
#[derive(Debug, Clone)]
pub struct FieldCodec {
    key: Arc<MasterKey>,
}

impl FieldCodec {
    /// Create a codec over `key`.
    pub fn new(key: Arc<MasterKey>) -> Self {
        Self { key }
    }

    /// Encrypt a value into its single-column storage form.
    ///
    /// `None` and `""` are stored as `None` without touching the cipher.
    ///
    /// # Errors
    ///
    /// Propagates any [`cipher::encrypt`] failure.
    pub fn encrypt_field(&self, value: Option<&str>) -> Result<Option<String>, CryptoError> {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        let envelope = cipher::encrypt(&self.key, value.as_bytes())?;
        envelope.to_json().map(Some)
    }

    /// Decrypt a stored value, reporting every failure.
    ///
    /// `None` and `""` decrypt to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EnvelopeParse`] if `stored` is not an envelope,
    /// [`CryptoError::InvalidUtf8`] if the plaintext is not text, and any
    /// [`cipher::decrypt`] failure.
    pub fn try_decrypt_field(&self, stored: Option<&str>) -> Result<Option<String>, CryptoError> {
        let Some(stored) = stored.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let envelope = EncryptionEnvelope::from_json(stored)?;
        let plaintext = cipher::decrypt(&self.key, &envelope)?;
        String::from_utf8(plaintext)
            .map(Some)
            .map_err(|_| CryptoError::InvalidUtf8)
    }

    /// Decrypt a stored value, degrading any failure to `None`.
    ///
    /// Failures are logged at `warn` with the error kind so tampering stays
    /// visible. Never panics and never returns partial plaintext.
    pub fn decrypt_field(&self, stored: Option<&str>) -> Option<String> {
        match self.try_decrypt_field(stored) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    kind = %e.kind(),
                    error = %e,
                    "stored field could not be decrypted; treating as absent"
                );
                None
            }
        }
    }
}
