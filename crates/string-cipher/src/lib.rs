//! AES-256 encryption of strings into printable envelopes.
//!
//! ```text
//! let envelope = string_cipher::encrypt("héllo 世界", "passphrase")?;
//! let plaintext = string_cipher::decrypt(&envelope, "passphrase")?;
//! ```
//!
//! The defaults are AES-256-GCM-SIV with a random nonce and a SHA-256 derived
//! key. [`StringCipher`] with [`CipherOptions`] selects the legacy CBC scheme
//! or zero-padded keys for values shared with the original iOS library.
//!
//! # Invariants
//!
//! - Key material and plaintext never appear in logs, errors, or `Debug` output.
//! - Every call is independent; there is no shared state.

pub mod cipher;
pub mod config;
pub mod crypto;
pub mod key;

pub use cipher::{CipherOptions, StringCipher};
pub use common::{CipherError, KeyDerivation, Scheme};
pub use config::ConfigError;

/// Encrypt `plaintext` under `key` with default options.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKey`] if `key` is empty.
pub fn encrypt(plaintext: &str, key: &str) -> Result<String, CipherError> {
    StringCipher::new().encrypt(plaintext, key)
}

/// Decrypt an envelope produced by [`encrypt`] under the same `key`.
///
/// # Errors
///
/// See [`StringCipher::decrypt`].
pub fn decrypt(ciphertext: &str, key: &str) -> Result<String, CipherError> {
    StringCipher::new().decrypt(ciphertext, key)
}
