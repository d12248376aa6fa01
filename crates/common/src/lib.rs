//! Common types, option vocabulary, and errors shared across `strcipher` crates.

pub mod error;
pub mod protocol;

pub use error::CipherError;
pub use protocol::{KeyDerivation, Scheme};
