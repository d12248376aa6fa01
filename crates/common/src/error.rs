//! Common error types shared across crates.

use thiserror::Error;

/// Error returned by every cipher operation.
///
/// No variant carries key material or plaintext. Each maps to a stable
/// machine-readable code via [`CipherError::code`]:
/// - [`CipherError::InvalidKey`] → `invalid_key`
/// - [`CipherError::Encoding`] → `encoding_error`
/// - [`CipherError::Decoding`] → `decoding_error`
/// - [`CipherError::Padding`] → `padding_error`
/// - [`CipherError::AuthenticationFailure`] → `authentication_failure`
/// - [`CipherError::Internal`] → `internal_error`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// The key string is empty and cannot be turned into an AES-256 key.
    #[error("invalid key: key must not be empty")]
    InvalidKey,

    /// Decrypted bytes are not valid UTF-8 text.
    #[error("encoding error: plaintext is not valid UTF-8")]
    Encoding,

    /// The ciphertext string is not a well-formed envelope.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// PKCS#7 padding was invalid after decryption (wrong key or corrupted input).
    #[error("padding error: wrong key or corrupted ciphertext")]
    Padding,

    /// The authentication tag did not verify (wrong key or tampered ciphertext).
    #[error("authentication failure: wrong key or tampered ciphertext")]
    AuthenticationFailure,

    /// The AEAD primitive rejected an otherwise valid request.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CipherError {
    /// Short machine-readable code, safe to log and to print.
    pub fn code(&self) -> &'static str {
        match self {
            CipherError::InvalidKey => "invalid_key",
            CipherError::Encoding => "encoding_error",
            CipherError::Decoding(_) => "decoding_error",
            CipherError::Padding => "padding_error",
            CipherError::AuthenticationFailure => "authentication_failure",
            CipherError::Internal(_) => "internal_error",
        }
    }

    /// Shorthand for [`CipherError::Decoding`].
    pub fn decoding(reason: impl Into<String>) -> Self {
        CipherError::Decoding(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(CipherError::InvalidKey.code(), "invalid_key");
        assert_eq!(CipherError::Encoding.code(), "encoding_error");
        assert_eq!(CipherError::decoding("x").code(), "decoding_error");
        assert_eq!(CipherError::Padding.code(), "padding_error");
        assert_eq!(
            CipherError::AuthenticationFailure.code(),
            "authentication_failure"
        );
        assert_eq!(CipherError::Internal("x".into()).code(), "internal_error");
    }

    #[test]
    fn display_includes_reason() {
        let e = CipherError::decoding("invalid base64 in nonce");
        assert!(e.to_string().contains("invalid base64 in nonce"));
    }
}
