//! `fieldcrypt`: the cryptographic services layer for a host application.
//!
//! - [`key`]: resolve and validate the 256-bit master key at startup.
//! - [`crypto::cipher`]: AES-256-GCM over byte buffers.
//! - [`codec`]: nullable string fields to and from a one-column JSON envelope.
//! - [`crypto::integrity`]: HMAC-SHA-256 sign and constant-time verify.
//! - [`crypto::token`]: random tokens and setup keys.
//! - [`crypto::digest`]: SHA-256 content fingerprints.
//!
//! Build a [`CryptoContext`] once at startup and pass clones to whatever needs
//! it. Every operation is synchronous and safe to call from many threads.

pub mod codec;
pub mod config;
pub mod context;
pub mod crypto;
pub mod key;
pub mod telemetry;

pub use codec::FieldCodec;
pub use config::{Config, DeploymentProfile};
pub use context::CryptoContext;
pub use crypto::digest::hash;
pub use crypto::integrity::{sign, verify, Signature};
pub use crypto::token::{generate_key, generate_token, DEFAULT_TOKEN_BYTES, MAX_TOKEN_BYTES};
pub use fieldcrypt_common::{CryptoError, EncryptionEnvelope, ErrorKind};
pub use key::{KeyMaterial, KeyMode, MasterKey};
