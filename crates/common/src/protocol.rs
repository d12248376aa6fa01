//! Option vocabulary and the JSON bodies printed by the command-line tool.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::CipherError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Envelope scheme used when encrypting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    /// AES-256-GCM-SIV with a random nonce: `v1.<nonce>.<ciphertext+tag>`.
    #[default]
    V1,
    /// AES-256-CBC, zero IV, PKCS#7, standard Base64. Unauthenticated and
    /// deterministic; kept for values produced by the original iOS library.
    Legacy,
}

/// How a key string becomes 32 bytes of AES-256 key material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyDerivation {
    /// SHA-256 of the UTF-8 key bytes.
    #[default]
    Sha256,
    /// UTF-8 key bytes copied into a zero-filled 32-byte buffer, truncated past 32.
    ZeroPad,
}

/// Returned when an option string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}` (expected one of: {expected})")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::V1 => "v1",
            Scheme::Legacy => "legacy",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" => Ok(Scheme::V1),
            "legacy" => Ok(Scheme::Legacy),
            _ => Err(ParseOptionError {
                kind: "scheme",
                value: s.to_owned(),
                expected: "v1, legacy",
            }),
        }
    }
}

impl KeyDerivation {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyDerivation::Sha256 => "sha256",
            KeyDerivation::ZeroPad => "zero-pad",
        }
    }
}

impl fmt::Display for KeyDerivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyDerivation {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(KeyDerivation::Sha256),
            "zero-pad" | "zeropad" | "zero_pad" => Ok(KeyDerivation::ZeroPad),
            _ => Err(ParseOptionError {
                kind: "key derivation",
                value: s.to_owned(),
                expected: "sha256, zero-pad",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Command output
// ---------------------------------------------------------------------------

/// Successful result of an encrypt or decrypt command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherOutput {
    /// Scheme the cipher was configured with.
    pub scheme: Scheme,
    /// Ciphertext envelope (encrypt) or recovered plaintext (decrypt).
    pub output: String,
}

/// Error body printed on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"padding_error"`).
    pub code: String,
    /// Human-readable description; never contains key material.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&CipherError> for ErrorResponse {
    fn from(err: &CipherError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}
