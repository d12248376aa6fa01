//! [`StringCipher`]: string in, printable envelope out, and back.

use common::{CipherError, KeyDerivation, Scheme};
use tracing::debug;

use crate::crypto::{aead, legacy};
use crate::key::DerivedKey;

/// Options fixed for the lifetime of a [`StringCipher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CipherOptions {
    /// Scheme used by `encrypt`.
    pub scheme: Scheme,
    /// How key strings become AES-256 keys, for both schemes.
    pub key_derivation: KeyDerivation,
    /// Allow a [`Scheme::V1`] cipher to decrypt legacy (unprefixed) values.
    pub accept_legacy: bool,
}

impl CipherOptions {
    /// Options that read and write values of the original iOS library:
    /// legacy scheme, zero-padded key.
    pub fn legacy_compatible() -> Self {
        Self {
            scheme: Scheme::Legacy,
            key_derivation: KeyDerivation::ZeroPad,
            accept_legacy: true,
        }
    }
}

/// Stateless AES-256 string cipher.
///
/// Every call derives its key, runs to completion, and drops the key; nothing
/// is shared between calls, so a single value can be used from any number of
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCipher {
    options: CipherOptions,
}

impl StringCipher {
    /// Cipher with default options: [`Scheme::V1`], [`KeyDerivation::Sha256`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CipherOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CipherOptions {
        &self.options
    }

    /// Encrypt the UTF-8 bytes of `plaintext` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKey`] if `key` is empty.
    pub fn encrypt(&self, plaintext: &str, key: &str) -> Result<String, CipherError> {
        self.encrypt_bytes(plaintext.as_bytes(), key)
    }

    /// Decrypt an envelope produced by [`StringCipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Everything [`StringCipher::decrypt_bytes`] returns, plus
    /// [`CipherError::Encoding`] if the recovered bytes are not UTF-8.
    pub fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String, CipherError> {
        let bytes = self.decrypt_bytes(ciphertext, key)?;
        String::from_utf8(bytes).map_err(|_| {
            debug!(code = "encoding_error", "decrypted value is not UTF-8");
            CipherError::Encoding
        })
    }

    /// Encrypt raw bytes into a printable envelope.
    pub fn encrypt_bytes(&self, plaintext: &[u8], key: &str) -> Result<String, CipherError> {
        let key = DerivedKey::derive(key, self.options.key_derivation)?;
        let envelope = match self.options.scheme {
            Scheme::V1 => aead::seal(plaintext, &key)?.to_string_repr(),
            Scheme::Legacy => legacy::encrypt(plaintext, &key),
        };
        debug!(
            scheme = %self.options.scheme,
            plaintext_len = plaintext.len(),
            envelope_len = envelope.len(),
            "value encrypted"
        );
        Ok(envelope)
    }

    /// Decrypt a printable envelope into raw bytes.
    ///
    /// `v1.` envelopes are always accepted. Anything else is read as a legacy
    /// value when the cipher's scheme is [`Scheme::Legacy`] or
    /// `accept_legacy` is set.
    ///
    /// # Errors
    ///
    /// The key is checked before the envelope, so an empty key is always
    /// reported as such.
    ///
    /// - [`CipherError::InvalidKey`] if `key` is empty.
    /// - [`CipherError::Decoding`] if `ciphertext` is malformed.
    /// - [`CipherError::AuthenticationFailure`] if a `v1` tag does not verify.
    /// - [`CipherError::Padding`] if legacy padding is invalid.
    pub fn decrypt_bytes(&self, ciphertext: &str, key: &str) -> Result<Vec<u8>, CipherError> {
        let key = DerivedKey::derive(key, self.options.key_derivation)?;
        let scheme = self.detect_scheme(ciphertext)?;
        let result = match scheme {
            Scheme::V1 => aead::SealedValue::parse(ciphertext).and_then(|v| aead::open(&v, &key)),
            Scheme::Legacy => legacy::decrypt(ciphertext, &key),
        };
        match &result {
            Ok(plaintext) => debug!(%scheme, plaintext_len = plaintext.len(), "value decrypted"),
            Err(e) => debug!(%scheme, code = e.code(), "decryption failed"),
        }
        result
    }

    fn detect_scheme(&self, ciphertext: &str) -> Result<Scheme, CipherError> {
        if aead::SealedValue::is_sealed_repr(ciphertext) {
            return Ok(Scheme::V1);
        }
        if self.options.scheme == Scheme::Legacy || self.options.accept_legacy {
            return Ok(Scheme::Legacy);
        }
        Err(CipherError::decoding(format!(
            "expected a {}.-prefixed envelope",
            aead::VERSION_PREFIX
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy() -> StringCipher {
        StringCipher::with_options(CipherOptions::legacy_compatible())
    }

    #[test]
    fn default_options() {
        let opts = *StringCipher::new().options();
        assert_eq!(opts.scheme, Scheme::V1);
        assert_eq!(opts.key_derivation, KeyDerivation::Sha256);
        assert!(!opts.accept_legacy);
    }

    #[test]
    fn v1_output_is_prefixed() {
        let out = StringCipher::new().encrypt("hello", "k").unwrap();
        assert!(out.starts_with("v1."));
    }

    #[test]
    fn legacy_output_is_plain_base64() {
        let out = legacy().encrypt("hello", "k").unwrap();
        assert!(!out.contains('.'));
        assert_eq!(legacy().decrypt(&out, "k").unwrap(), "hello");
    }

    #[test]
    fn v1_cipher_rejects_legacy_by_default() {
        let out = legacy().encrypt("hello", "k").unwrap();
        assert!(matches!(
            StringCipher::new().decrypt(&out, "k"),
            Err(CipherError::Decoding(_))
        ));
    }

    #[test]
    fn v1_cipher_migrates_legacy_when_accepted() {
        let options = CipherOptions {
            accept_legacy: true,
            key_derivation: KeyDerivation::ZeroPad,
            ..CipherOptions::default()
        };
        let migrating = StringCipher::with_options(options);
        let old = legacy().encrypt("stored value", "app-key").unwrap();
        assert_eq!(migrating.decrypt(&old, "app-key").unwrap(), "stored value");

        let new = migrating.encrypt("stored value", "app-key").unwrap();
        assert!(new.starts_with("v1."));
        assert_eq!(migrating.decrypt(&new, "app-key").unwrap(), "stored value");
    }

    #[test]
    fn legacy_cipher_still_reads_v1() {
        let sealed = StringCipher::with_options(CipherOptions {
            key_derivation: KeyDerivation::ZeroPad,
            ..CipherOptions::default()
        })
        .encrypt("x", "k")
        .unwrap();
        assert_eq!(legacy().decrypt(&sealed, "k").unwrap(), "x");
    }

    #[test]
    fn non_utf8_plaintext_is_encoding_error() {
        let cipher = StringCipher::new();
        let envelope = cipher.encrypt_bytes(&[0xff, 0xfe, 0x00], "k").unwrap();
        assert_eq!(cipher.decrypt_bytes(&envelope, "k").unwrap(), vec![0xff_u8, 0xfe, 0x00]);
        assert_eq!(cipher.decrypt(&envelope, "k").unwrap_err(), CipherError::Encoding);
    }

    #[test]
    fn empty_key_rejected_before_parsing_payload() {
        let cipher = StringCipher::new();
        let envelope = cipher.encrypt("x", "k").unwrap();
        assert_eq!(cipher.decrypt(&envelope, "").unwrap_err(), CipherError::InvalidKey);
    }

    #[test]
    fn empty_key_wins_over_malformed_envelope() {
        for cipher in [StringCipher::new(), legacy()] {
            for input in ["not-base64!!", "v1.x.y", ""] {
                assert_eq!(
                    cipher.decrypt(input, "").unwrap_err(),
                    CipherError::InvalidKey,
                    "{input}"
                );
            }
        }
    }

    #[test]
    fn cipher_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StringCipher>();
    }
}
