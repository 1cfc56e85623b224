//! [`MasterKey`]: the in-memory 256-bit encryption key.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::KEY_LEN;

/// Fixed-size buffer holding exactly [`KEY_LEN`] bytes of key material.
///
/// Not `Clone` and not serialisable; share it behind an `Arc`. The bytes are
/// overwritten with zeroes on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// `true` when every byte has the same value (e.g. all zeroes).
    pub fn is_weak(&self) -> bool {
        let first = self.0[0];
        self.0.iter().all(|&b| b == first)
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("MasterKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_in_debug() {
        let key = MasterKey::from_bytes([0xAB; KEY_LEN]);
        let dbg = format!("{key:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.to_lowercase().contains("ab, "));
    }

    #[test]
    fn weak_detection() {
        assert!(MasterKey::from_bytes([0u8; KEY_LEN]).is_weak());
        assert!(MasterKey::from_bytes([0x7f; KEY_LEN]).is_weak());

        let mut bytes = [0u8; KEY_LEN];
        bytes[31] = 1;
        assert!(!MasterKey::from_bytes(bytes).is_weak());
    }

    #[test]
    fn zeroize_clears_bytes() {
        let mut key = MasterKey::from_bytes([0x42; KEY_LEN]);
        key.zeroize();
        assert_eq!(key.as_bytes(), &[0u8; KEY_LEN]);
    }
}
