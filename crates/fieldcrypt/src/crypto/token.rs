//! Random tokens and setup keys from the OS CSPRNG.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use fieldcrypt_common::CryptoError;
use zeroize::Zeroizing;

use super::KEY_LEN;

/// Default token size in bytes.
pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Largest token size accepted by [`generate_token`].
pub const MAX_TOKEN_BYTES: usize = 1024;

/// Generate `byte_len` random bytes rendered as lowercase hex.
///
/// Used for bearer session tokens and unique identifier material.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidTokenLength`] if `byte_len` is zero or above
/// [`MAX_TOKEN_BYTES`].
pub fn generate_token(byte_len: usize) -> Result<String, CryptoError> {
    if byte_len == 0 || byte_len > MAX_TOKEN_BYTES {
        return Err(CryptoError::InvalidTokenLength);
    }
    let mut bytes = Zeroizing::new(vec![0u8; byte_len]);
    OsRng.fill_bytes(bytes.as_mut_slice());
    Ok(hex::encode(bytes.as_slice()))
}

/// Generate a fresh master key as 64 hex characters.
///
/// Operator-facing setup only; the output is meant for `ENCRYPTION_KEY`.
/// Never use it for per-request tokens.
pub fn generate_key() -> String {
    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    OsRng.fill_bytes(bytes.as_mut_slice());
    hex::encode(bytes.as_slice())
}
