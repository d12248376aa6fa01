//! AES-256 encryption primitives behind the string cipher.
//!
//! # Envelope formats
//!
//! ```text
//! v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>    // aead
//! <base64(ciphertext)>                                              // legacy
//! ```
//!
//! The `v1` prefix lets [`aead`] envelopes be told apart from legacy ones,
//! which never contain a `.`.

pub mod aead;
pub mod legacy;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;
