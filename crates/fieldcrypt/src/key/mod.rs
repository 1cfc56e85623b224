//! Master key resolution.
//!
//! # Lifecycle
//!
//! 1. At startup, [`resolve_key`] turns the optional `ENCRYPTION_KEY` value into
//!    a [`KeyMaterial`], failing fast on anything that is not 64 hex characters.
//! 2. With no key configured, a development profile gets a random key for the
//!    lifetime of the process and a loud warning. A production profile refuses.
//! 3. The resulting [`MasterKey`] is immutable and shared behind an `Arc`.
//!
//! # Security invariants
//!
//! - The key is **never** written to disk, logged, or included in traces.
//! - Nothing in this module retries; a bad key is an operator error.

pub mod master;

pub use master::MasterKey;

use std::sync::Arc;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use fieldcrypt_common::CryptoError;
use tracing::{info, warn};

use crate::config::DeploymentProfile;
use crate::crypto::KEY_LEN;

/// Length of the hex form of a master key.
pub const KEY_HEX_LEN: usize = KEY_LEN * 2;

/// Where the process key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Decoded from configuration. Ciphertext survives restarts.
    Configured,
    /// Generated at startup. Ciphertext written in this mode is unreadable
    /// after the process exits.
    Ephemeral,
}

impl KeyMode {
    /// Stable label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMode::Configured => "configured",
            KeyMode::Ephemeral => "ephemeral",
        }
    }
}

/// A resolved master key together with the mode it was resolved in.
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    /// The process-wide key.
    pub key: Arc<MasterKey>,
    /// How the key was obtained.
    pub mode: KeyMode,
}

/// Resolve the process master key from an optional configured hex string.
///
/// A blank `source` counts as absent. A present value must be exactly
/// [`KEY_HEX_LEN`] hexadecimal characters; surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyFormat`] if `source` has the wrong length
/// or contains non-hex characters.
/// Returns [`CryptoError::EphemeralKeyForbidden`] if `source` is absent under
/// [`DeploymentProfile::Production`].
/// Returns [`CryptoError::WeakKey`] if every key byte is identical under
/// [`DeploymentProfile::Production`].
pub fn resolve_key(
    source: Option<&str>,
    profile: DeploymentProfile,
) -> Result<KeyMaterial, CryptoError> {
    let source = source.map(str::trim).filter(|s| !s.is_empty());

    let Some(hex_key) = source else {
        if profile == DeploymentProfile::Production {
            return Err(CryptoError::EphemeralKeyForbidden);
        }
        warn!(
            key_mode = KeyMode::Ephemeral.as_str(),
            profile = profile.as_str(),
            "ENCRYPTION_KEY is not set; generated an ephemeral key. \
             Encrypted fields will be unreadable after restart"
        );
        return Ok(KeyMaterial {
            key: Arc::new(random_key()),
            mode: KeyMode::Ephemeral,
        });
    };

    let key = parse_hex_key(hex_key)?;
    if key.is_weak() {
        if profile == DeploymentProfile::Production {
            return Err(CryptoError::WeakKey);
        }
        warn!(
            profile = profile.as_str(),
            "ENCRYPTION_KEY is weak (all bytes identical); accepted outside production"
        );
    }

    info!(
        key_mode = KeyMode::Configured.as_str(),
        profile = profile.as_str(),
        "encryption key loaded"
    );
    Ok(KeyMaterial {
        key: Arc::new(key),
        mode: KeyMode::Configured,
    })
}

/// Decode a 64-character hex string into a [`MasterKey`].
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyFormat`] on wrong length or non-hex input.
/// The message names the problem, never the offending characters.
pub fn parse_hex_key(hex_key: &str) -> Result<MasterKey, CryptoError> {
    if hex_key.len() != KEY_HEX_LEN {
        return Err(CryptoError::InvalidKeyFormat(format!(
            "expected {KEY_HEX_LEN} hex characters, got {}",
            hex_key.len()
        )));
    }
    let mut bytes = [0u8; KEY_LEN];
    hex::decode_to_slice(hex_key, &mut bytes)
        .map_err(|_| CryptoError::InvalidKeyFormat("contains non-hex characters".into()))?;
    Ok(MasterKey::from_bytes(bytes))
}

fn random_key() -> MasterKey {
    let mut bytes = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut bytes);
    MasterKey::from_bytes(bytes)
}
