//! Shared, read-only crypto state handed to the host application.

use fieldcrypt_common::CryptoError;

use crate::codec::FieldCodec;
use crate::config::Config;
use crate::key::{self, KeyMaterial, KeyMode, MasterKey};

/// Process-wide crypto state, built once at startup before any request is
/// served and never mutated afterwards.
///
/// Cheap to clone; clones share the same key. Hand a clone to every request
/// handler, repository, or webhook dispatcher that needs field encryption.
#[derive(Debug, Clone)]
pub struct CryptoContext {
    material: KeyMaterial,
}

impl CryptoContext {
    /// Resolve the master key from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns any configuration-kind error from [`key::resolve_key`].
    pub fn from_config(cfg: &Config) -> Result<Self, CryptoError> {
        let material = key::resolve_key(cfg.encryption_key(), cfg.deployment_profile)?;
        Ok(Self { material })
    }

    /// Wrap an already resolved key.
    pub fn new(material: KeyMaterial) -> Self {
        Self { material }
    }

    /// Whether the key came from configuration or was generated at startup.
    pub fn key_mode(&self) -> KeyMode {
        self.material.mode
    }

    /// Borrow the master key for direct use with [`crate::crypto::cipher`].
    pub fn master_key(&self) -> &MasterKey {
        &self.material.key
    }

    /// A field codec over the process key.
    pub fn field_codec(&self) -> FieldCodec {
        FieldCodec::new(self.material.key.clone())
    }
}
