//! [`DerivedKey`]: the 32-byte AES-256 key produced from a caller's key string.

use common::{CipherError, KeyDerivation};
use sha2::digest::generic_array::GenericArray;
use sha2::{Digest, Sha256};
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::crypto::KEY_LEN;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// Lives only for the duration of one encrypt or decrypt call and is wiped
/// on drop. The SHA-256 output is written straight into the wiped buffer.
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    /// Derive the AES-256 key for `key` using `method`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKey`] if `key` is empty.
    pub fn derive(key: &str, method: KeyDerivation) -> Result<Self, CipherError> {
        if key.is_empty() {
            return Err(CipherError::InvalidKey);
        }
        let mut buf = Zeroizing::new([0u8; KEY_LEN]);
        match method {
            KeyDerivation::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(key.as_bytes());
                hasher.finalize_into(GenericArray::from_mut_slice(&mut buf[..]));
            }
            KeyDerivation::ZeroPad => {
                let bytes = key.as_bytes();
                let n = bytes.len().min(KEY_LEN);
                buf[..n].copy_from_slice(&bytes[..n]);
            }
        }
        Ok(Self(buf))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl ZeroizeOnDrop for DerivedKey {}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("DerivedKey([REDACTED])")
    }
}
