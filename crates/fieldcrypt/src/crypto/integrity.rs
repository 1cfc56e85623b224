//! HMAC-SHA-256 signing and constant-time verification.
//!
//! Used for record integrity tags and for signing outbound webhook bodies.
//! Webhook secrets are per recipient; where the signature travels (header
//! names, timestamp header) is the caller's business.

use std::fmt;

use fieldcrypt_common::CryptoError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Byte length of an HMAC-SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// Lowercase hex HMAC-SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// Borrow the hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the hex form.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sign the exact bytes of `data` with `secret`.
///
/// # Errors
///
/// Returns [`CryptoError::EmptySecret`] if `secret` is empty.
pub fn sign(data: &[u8], secret: &[u8]) -> Result<Signature, CryptoError> {
    let digest = compute(data, secret)?;
    Ok(Signature(hex::encode(digest)))
}

/// Check `signature` (hex) against the HMAC of `data` under `secret`.
///
/// Returns `false` for a forged or mismatched signature, for a signature that
/// is not hex or not [`DIGEST_LEN`] bytes long, and for an empty secret. The
/// only early exit is on length; content is compared in constant time.
pub fn verify(data: &[u8], signature: &str, secret: &[u8]) -> bool {
    let Ok(expected) = compute(data, secret) else {
        return false;
    };
    let Ok(supplied) = hex::decode(signature.trim()) else {
        warn!(kind = "authentication", reason = "not_hex", "signature rejected");
        return false;
    };
    if supplied.len() != DIGEST_LEN {
        warn!(kind = "authentication", reason = "length", "signature rejected");
        return false;
    }

    let matches: bool = expected.as_slice().ct_eq(supplied.as_slice()).into();
    if !matches {
        warn!(kind = "authentication", reason = "mismatch", "signature rejected");
    }
    matches
}

fn compute(data: &[u8], secret: &[u8]) -> Result<[u8; DIGEST_LEN], CryptoError> {
    if secret.is_empty() {
        return Err(CryptoError::EmptySecret);
    }
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(secret).map_err(|_| CryptoError::EmptySecret)?;
    mac.update(data);
    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    Ok(digest)
}
