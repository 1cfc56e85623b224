//! Common types and errors shared across `fieldcrypt` crates.
//!
//! Nothing in here performs cryptography. Host crates that only need to
//! inspect or migrate stored envelopes can depend on this crate alone.

pub mod envelope;
pub mod error;

pub use envelope::EncryptionEnvelope;
pub use error::{CryptoError, ErrorKind};
