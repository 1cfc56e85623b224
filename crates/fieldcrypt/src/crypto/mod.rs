//! Cryptographic primitives.
//!
//! This module is free of configuration and logging setup. Every function is a
//! pure function of its inputs plus a fresh draw from the OS CSPRNG, and is
//! safe to call concurrently.
//!
//! - [`cipher`]: AES-256-GCM over byte buffers with a 16-byte IV and a
//!   detached 16-byte tag.
//! - [`integrity`]: HMAC-SHA-256 signing and constant-time verification.
//! - [`token`]: random tokens and setup keys.
//! - [`digest`]: plain SHA-256 fingerprints.

pub mod cipher;
pub mod digest;
pub mod integrity;
pub mod token;

pub use cipher::{IV_LEN, KEY_LEN, TAG_LEN};
