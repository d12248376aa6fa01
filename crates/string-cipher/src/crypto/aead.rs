//! The default `v1` scheme: AES-256-GCM-SIV over a string's bytes.
//!
//! Each call to [`seal`] draws its own 96-bit nonce from the OS, so the same
//! string under the same key produces a different envelope every time. The
//! nonce travels inside the envelope; [`open`] needs nothing but the key.
//! A wrong key and an edited envelope look the same to the caller: the tag
//! does not verify and [`open`] reports [`CipherError::AuthenticationFailure`].

use aes_gcm_siv::{
    aead::{Aead, KeyInit, OsRng},
    Aes256GcmSiv, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use common::CipherError;

use crate::key::DerivedKey;

pub const NONCE_LEN: usize = 12;

/// Tag bytes at the end of every ciphertext; shorter input cannot be genuine.
pub const TAG_LEN: usize = 16;

/// Marks an envelope as `v1` and separates it from legacy Base64.
pub const VERSION_PREFIX: &str = "v1";

/// Nonce and ciphertext of one `v1` envelope, decoded from its text form
/// `v1.<base64url(nonce)>.<base64url(ciphertext+tag)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedValue {
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the tag appended.
    pub ciphertext: Vec<u8>,
}

impl SealedValue {
    /// Returns `true` if `s` carries the `v1.` prefix.
    pub fn is_sealed_repr(s: &str) -> bool {
        s.strip_prefix(VERSION_PREFIX)
            .is_some_and(|rest| rest.starts_with('.'))
    }

    /// Render the envelope text handed back to callers.
    pub fn to_string_repr(&self) -> String {
        format!(
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }

    /// Split and decode envelope text. Nothing is decrypted here.
    ///
    /// # Errors
    ///
    /// [`CipherError::Decoding`] names the first part that is missing, is not
    /// base64url, or has the wrong length.
    pub fn parse(s: &str) -> Result<Self, CipherError> {
        let parts: Vec<&str> = s.splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(CipherError::decoding("expected v1.<nonce>.<ciphertext>"));
        }
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|e| CipherError::decoding(format!("nonce: {e}")))?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CipherError::decoding(format!(
                "nonce must be {NONCE_LEN} bytes, got {}",
                nonce_bytes.len()
            )));
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_bytes);

        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|e| CipherError::decoding(format!("ciphertext: {e}")))?;
        if ciphertext.len() < TAG_LEN {
            return Err(CipherError::decoding("ciphertext shorter than tag"));
        }

        Ok(Self { nonce, ciphertext })
    }
}

/// Encrypt `plaintext` under `key`.
///
/// # Errors
///
/// [`CipherError::Internal`] only if the AEAD refuses a 32-byte key.
pub fn seal(plaintext: &[u8], key: &DerivedKey) -> Result<SealedValue, CipherError> {
    let cipher = build_cipher(key)?;

    use aes_gcm_siv::aead::rand_core::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CipherError::Internal("aead seal failed".into()))?;

    Ok(SealedValue {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Verify and decrypt `value`, returning the original bytes.
///
/// # Errors
///
/// [`CipherError::AuthenticationFailure`] when the tag does not verify.
pub fn open(value: &SealedValue, key: &DerivedKey) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    let nonce = Nonce::from_slice(&value.nonce);
    cipher
        .decrypt(nonce, value.ciphertext.as_ref())
        .map_err(|_| CipherError::AuthenticationFailure)
}

fn build_cipher(key: &DerivedKey) -> Result<Aes256GcmSiv, CipherError> {
    Aes256GcmSiv::new_from_slice(key.as_bytes())
        .map_err(|_| CipherError::Internal("aead key rejected".into()))
}
