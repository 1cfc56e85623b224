//! AES-256-GCM encryption and decryption into [`EncryptionEnvelope`]s.
//!
//! **IV size:** 16 bytes, drawn from the OS CSPRNG on every call. GCM accepts
//! non-96-bit nonces by hashing them through GHASH; the 16-byte size keeps
//! envelopes compatible with rows already at rest.
//!
//! **Never derive the IV from the plaintext or a counter.** IV reuse under one
//! key breaks both confidentiality and authentication.

use aes_gcm::{
    aead::{
        consts::U16,
        generic_array::GenericArray,
        rand_core::RngCore,
        AeadInPlace, KeyInit, OsRng,
    },
    aes::Aes256,
    AesGcm,
};
use fieldcrypt_common::envelope::ALGORITHM;
use fieldcrypt_common::{CryptoError, EncryptionEnvelope};
use zeroize::Zeroize;

use crate::key::MasterKey;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the GCM IV (16 bytes = 128 bits).
pub const IV_LEN: usize = 16;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// AES-256-GCM with a 128-bit nonce and 128-bit tag.
type Aes256Gcm16 = AesGcm<Aes256, U16, U16>;

/// Encrypt `plaintext` under `key` with a fresh random IV.
///
/// # Errors
///
/// Returns [`CryptoError::EmptyInput`] if `plaintext` is empty.
/// Returns [`CryptoError::PlaintextTooLong`] if `plaintext` exceeds the GCM
/// per-message limit.
pub fn encrypt(key: &MasterKey, plaintext: &[u8]) -> Result<EncryptionEnvelope, CryptoError> {
    if plaintext.is_empty() {
        return Err(CryptoError::EmptyInput);
    }
    let cipher = build_cipher(key);

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&iv), b"", &mut buffer)
        .map_err(|_| CryptoError::PlaintextTooLong)?;

    Ok(EncryptionEnvelope {
        iv: hex::encode(iv),
        ciphertext: hex::encode(&buffer),
        auth_tag: hex::encode(tag),
        algorithm: ALGORITHM.into(),
    })
}

/// Decrypt an envelope produced by [`encrypt`] under the same key.
///
/// The tag is checked before any plaintext is released; on mismatch nothing
/// but the error is returned.
///
/// # Errors
///
/// Returns [`CryptoError::UnsupportedAlgorithm`] if the envelope is not
/// AES-256-GCM.
/// Returns [`CryptoError::MalformedEnvelope`] if a field is missing, is not
/// hex, or has the wrong length.
/// Returns [`CryptoError::AuthenticationFailed`] if the tag does not verify
/// (tampering, corruption, or wrong key).
pub fn decrypt(key: &MasterKey, envelope: &EncryptionEnvelope) -> Result<Vec<u8>, CryptoError> {
    if !envelope.algorithm.eq_ignore_ascii_case(ALGORITHM) {
        return Err(CryptoError::UnsupportedAlgorithm(envelope.algorithm.clone()));
    }
    let missing = envelope.missing_fields();
    if !missing.is_empty() {
        return Err(CryptoError::MalformedEnvelope(format!(
            "missing {}",
            missing.join(", ")
        )));
    }

    let iv = decode_fixed::<IV_LEN>(&envelope.iv, "iv")?;
    let tag = decode_fixed::<TAG_LEN>(&envelope.auth_tag, "authTag")?;
    let mut buffer = hex::decode(&envelope.ciphertext)
        .map_err(|_| CryptoError::MalformedEnvelope("ciphertext is not hex".into()))?;

    let cipher = build_cipher(key);
    let verified = cipher.decrypt_in_place_detached(
        GenericArray::from_slice(&iv),
        b"",
        &mut buffer,
        GenericArray::from_slice(&tag),
    );
    if verified.is_err() {
        // The keystream may already have been applied; scrub before dropping.
        buffer.zeroize();
        return Err(CryptoError::AuthenticationFailed);
    }
    Ok(buffer)
}

fn build_cipher(key: &MasterKey) -> Aes256Gcm16 {
    Aes256Gcm16::new(GenericArray::from_slice(key.as_bytes()))
}

fn decode_fixed<const N: usize>(value: &str, field: &str) -> Result<[u8; N], CryptoError> {
    let bytes = hex::decode(value)
        .map_err(|_| CryptoError::MalformedEnvelope(format!("{field} is not hex")))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        CryptoError::MalformedEnvelope(format!(
            "{field} must be {N} bytes, got {}",
            b.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn random_key() -> MasterKey {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        MasterKey::from_bytes(key)
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = random_key();
        let envelope = encrypt(&key, b"123-45-6789").unwrap();
        assert_eq!(decrypt(&key, &envelope).unwrap(), b"123-45-6789");
    }

    #[test]
    fn envelope_geometry() {
        let key = random_key();
        let envelope = encrypt(&key, b"hello world").unwrap();
        assert_eq!(envelope.iv.len(), IV_LEN * 2);
        assert_eq!(envelope.auth_tag.len(), TAG_LEN * 2);
        assert_eq!(envelope.ciphertext.len(), b"hello world".len() * 2);
        assert_eq!(envelope.algorithm, ALGORITHM);
    }

    #[test]
    fn empty_plaintext_rejected() {
        let key = random_key();
        assert_eq!(encrypt(&key, b"").unwrap_err(), CryptoError::EmptyInput);
    }

    #[test]
    fn fresh_iv_per_call() {
        let key = random_key();
        let a = encrypt(&key, b"same plaintext").unwrap();
        let b = encrypt(&key, b"same plaintext").unwrap();
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let envelope = encrypt(&random_key(), b"secret").unwrap();
        assert_eq!(
            decrypt(&random_key(), &envelope).unwrap_err(),
            CryptoError::AuthenticationFailed
        );
    }

    #[test]
    fn tampered_iv_fails_authentication() {
        let key = random_key();
        let mut envelope = encrypt(&key, b"tamper me").unwrap();
        let mut iv = hex::decode(&envelope.iv).unwrap();
        iv[0] ^= 0x01;
        envelope.iv = hex::encode(iv);
        assert_eq!(
            decrypt(&key, &envelope).unwrap_err(),
            CryptoError::AuthenticationFailed
        );
    }

    #[test]
    fn missing_fields_are_malformed() {
        let key = random_key();
        let full = encrypt(&key, b"x").unwrap();

        let mut no_tag = full.clone();
        no_tag.auth_tag.clear();
        let err = decrypt(&key, &no_tag).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedEnvelope(ref m) if m.contains("authTag")));

        let mut no_iv = full.clone();
        no_iv.iv.clear();
        assert!(matches!(
            decrypt(&key, &no_iv),
            Err(CryptoError::MalformedEnvelope(_))
        ));

        let mut no_ct = full;
        no_ct.ciphertext.clear();
        assert!(matches!(
            decrypt(&key, &no_ct),
            Err(CryptoError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn short_tag_is_malformed_not_authentication() {
        let key = random_key();
        let mut envelope = encrypt(&key, b"x").unwrap();
        envelope.auth_tag.truncate(16);
        assert!(matches!(
            decrypt(&key, &envelope),
            Err(CryptoError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn non_hex_is_malformed() {
        let key = random_key();
        let mut envelope = encrypt(&key, b"x").unwrap();
        envelope.ciphertext = "zz".into();
        assert!(matches!(
            decrypt(&key, &envelope),
            Err(CryptoError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn unknown_algorithm_rejected() {
        let key = random_key();
        let mut envelope = encrypt(&key, b"x").unwrap();
        envelope.algorithm = "aes-128-cbc".into();
        assert_eq!(
            decrypt(&key, &envelope).unwrap_err(),
            CryptoError::UnsupportedAlgorithm("aes-128-cbc".into())
        );
    }

    #[test]
    fn all_zero_key_still_round_trips() {
        let key = MasterKey::from_bytes([0u8; KEY_LEN]);
        let envelope = encrypt(&key, b"hello world").unwrap();
        assert_eq!(decrypt(&key, &envelope).unwrap(), b"hello world");
    }

    proptest! {
        #[test]
        fn round_trip_any_plaintext(plaintext in proptest::collection::vec(any::<u8>(), 1..512)) {
            let key = random_key();
            let envelope = encrypt(&key, &plaintext).unwrap();
            prop_assert_eq!(decrypt(&key, &envelope).unwrap(), plaintext);
        }

        #[test]
        fn any_single_bit_flip_is_detected(
            plaintext in proptest::collection::vec(any::<u8>(), 1..64),
            flip_tag in any::<bool>(),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let key = random_key();
            let mut envelope = encrypt(&key, &plaintext).unwrap();
            let target = if flip_tag { &mut envelope.auth_tag } else { &mut envelope.ciphertext };
            let mut bytes = hex::decode(&*target).unwrap();
            let i = index.index(bytes.len());
            bytes[i] ^= 1 << bit;
            *target = hex::encode(bytes);
            prop_assert_eq!(decrypt(&key, &envelope), Err(CryptoError::AuthenticationFailed));
        }
    }
}
