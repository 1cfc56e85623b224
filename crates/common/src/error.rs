//! Error taxonomy for the crypto core.

use std::fmt;

use thiserror::Error;

/// Broad category of a [`CryptoError`].
///
/// The label is emitted as a structured log field so that tampering
/// (`authentication`) can be told apart from caller bugs (`input_contract`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Key absent or malformed at startup. Fatal.
    Configuration,
    /// The immediate caller broke the contract (empty input, missing fields).
    InputContract,
    /// GCM tag or HMAC mismatch. Security relevant.
    Authentication,
    /// A stored value could not be recovered on the field read path.
    DegradedRead,
}

impl ErrorKind {
    /// Stable snake_case label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::InputContract => "input_contract",
            ErrorKind::Authentication => "authentication",
            ErrorKind::DegradedRead => "degraded_read",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the crypto core.
///
/// Messages never include key bytes, plaintext, or signing secrets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The configured master key is not 64 hexadecimal characters.
    #[error("invalid encryption key format: {0}")]
    InvalidKeyFormat(String),

    /// The configured master key is structurally valid but trivially weak.
    #[error("encryption key is weak: all bytes are identical")]
    WeakKey,

    /// No key is configured and the deployment profile forbids an ephemeral key.
    #[error("no encryption key configured and ephemeral keys are forbidden in production")]
    EphemeralKeyForbidden,

    /// Empty plaintext was handed to `encrypt`.
    #[error("refusing to encrypt empty input")]
    EmptyInput,

    /// The plaintext exceeds the GCM length limit for a single message.
    #[error("plaintext too long for a single AES-GCM message")]
    PlaintextTooLong,

    /// Empty secret was handed to `sign`.
    #[error("signing secret must not be empty")]
    EmptySecret,

    /// A token of zero bytes, or above the size limit, was requested.
    #[error("token length out of range")]
    InvalidTokenLength,

    /// An envelope field is missing or has the wrong shape.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The envelope names an algorithm this build does not implement.
    #[error("unsupported envelope algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The authentication tag did not verify. Ciphertext, IV, or tag was
    /// altered, or the wrong key was used.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The stored text could not be parsed as an envelope.
    #[error("envelope could not be parsed: {0}")]
    EnvelopeParse(String),

    /// Decryption succeeded but the plaintext is not valid UTF-8.
    #[error("decrypted field is not valid UTF-8")]
    InvalidUtf8,
}

impl CryptoError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::InvalidKeyFormat(_)
            | CryptoError::WeakKey
            | CryptoError::EphemeralKeyForbidden => ErrorKind::Configuration,
            CryptoError::EmptyInput
            | CryptoError::PlaintextTooLong
            | CryptoError::EmptySecret
            | CryptoError::InvalidTokenLength
            | CryptoError::MalformedEnvelope(_)
            | CryptoError::UnsupportedAlgorithm(_) => ErrorKind::InputContract,
            CryptoError::AuthenticationFailed => ErrorKind::Authentication,
            CryptoError::EnvelopeParse(_) | CryptoError::InvalidUtf8 => ErrorKind::DegradedRead,
        }
    }
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        CryptoError::EnvelopeParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(
            CryptoError::InvalidKeyFormat("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(CryptoError::WeakKey.kind(), ErrorKind::Configuration);
        assert_eq!(CryptoError::EmptyInput.kind(), ErrorKind::InputContract);
        assert_eq!(
            CryptoError::MalformedEnvelope("iv".into()).kind(),
            ErrorKind::InputContract
        );
        assert_eq!(
            CryptoError::AuthenticationFailed.kind(),
            ErrorKind::Authentication
        );
        assert_eq!(CryptoError::InvalidUtf8.kind(), ErrorKind::DegradedRead);
    }

    #[test]
    fn authentication_is_distinct_from_input_contract() {
        assert_ne!(
            CryptoError::AuthenticationFailed.kind(),
            CryptoError::MalformedEnvelope("authTag".into()).kind()
        );
    }

    #[test]
    fn kind_labels() {
        assert_eq!(ErrorKind::Authentication.to_string(), "authentication");
        assert_eq!(ErrorKind::DegradedRead.as_str(), "degraded_read");
    }

    #[test]
    fn display_includes_message() {
        let e = CryptoError::MalformedEnvelope("missing iv".into());
        assert!(e.to_string().contains("missing iv"));
    }

    #[test]
    fn json_errors_become_parse_failures() {
        let err = serde_json::from_str::<serde_json::Value>("not valid json").unwrap_err();
        let e: CryptoError = err.into();
        assert_eq!(e.kind(), ErrorKind::DegradedRead);
    }
}
