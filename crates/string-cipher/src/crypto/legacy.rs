//! AES-256-CBC with a zero IV and PKCS#7 padding, Base64-encoded.
//!
//! This is the construction CommonCrypto string bindings use when no IV is
//! supplied. It is deterministic and unauthenticated: identical plaintexts
//! produce identical ciphertexts, and tampering is only caught when it happens
//! to break the padding. Use it to read or produce values shared with those
//! bindings, not for new data.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::CipherError;

use crate::crypto::KEY_LEN;
use crate::key::DerivedKey;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

const ZERO_IV: [u8; BLOCK_LEN] = [0u8; BLOCK_LEN];

/// Encrypt `plaintext` and return standard padded Base64.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> String {
    let cipher = block_cipher(key.as_bytes());
    let mut buf = pad(plaintext);
    cbc_encrypt(&cipher, &mut buf);
    STANDARD.encode(&buf)
}

/// Decode and decrypt a Base64 legacy value.
///
/// # Errors
///
/// Returns [`CipherError::Decoding`] if `encoded` is not Base64 or does not
/// hold a positive whole number of blocks, and [`CipherError::Padding`] if the
/// decrypted padding is invalid.
pub fn decrypt(encoded: &str, key: &DerivedKey) -> Result<Vec<u8>, CipherError> {
    let mut buf = STANDARD
        .decode(encoded.trim())
        .map_err(|e| CipherError::decoding(format!("base64: {e}")))?;
    if buf.is_empty() || buf.len() % BLOCK_LEN != 0 {
        return Err(CipherError::decoding(format!(
            "ciphertext must be a non-zero multiple of {BLOCK_LEN} bytes, got {}",
            buf.len()
        )));
    }
    let cipher = block_cipher(key.as_bytes());
    cbc_decrypt(&cipher, &mut buf);
    unpad(&mut buf)?;
    Ok(buf)
}

fn block_cipher(key: &[u8; KEY_LEN]) -> Aes256 {
    Aes256::new(GenericArray::from_slice(&key[..]))
}

/// Append PKCS#7 padding. Block-aligned input gains a full padding block.
fn pad(plaintext: &[u8]) -> Vec<u8> {
    let n = BLOCK_LEN - plaintext.len() % BLOCK_LEN;
    let mut buf = Vec::with_capacity(plaintext.len() + n);
    buf.extend_from_slice(plaintext);
    buf.resize(plaintext.len() + n, n as u8);
    buf
}

fn unpad(buf: &mut Vec<u8>) -> Result<(), CipherError> {
    let n = match buf.last() {
        Some(&n) => n as usize,
        None => return Err(CipherError::Padding),
    };
    if n == 0 || n > BLOCK_LEN || n > buf.len() {
        return Err(CipherError::Padding);
    }
    if !buf[buf.len() - n..].iter().all(|&b| b as usize == n) {
        return Err(CipherError::Padding);
    }
    buf.truncate(buf.len() - n);
    Ok(())
}

/// Encrypt block-aligned `buf` in place.
fn cbc_encrypt(cipher: &Aes256, buf: &mut [u8]) {
    let mut prev = ZERO_IV;
    for block in buf.chunks_exact_mut(BLOCK_LEN) {
        block.iter_mut().zip(prev.iter()).for_each(|(b, p)| *b ^= p);
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
        prev.copy_from_slice(block);
    }
}

/// Decrypt block-aligned `buf` in place.
fn cbc_decrypt(cipher: &Aes256, buf: &mut [u8]) {
    let mut prev = ZERO_IV;
    for block in buf.chunks_exact_mut(BLOCK_LEN) {
        let mut saved = [0u8; BLOCK_LEN];
        saved.copy_from_slice(block);
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
        block.iter_mut().zip(prev.iter()).for_each(|(b, p)| *b ^= p);
        prev = saved;
    }
}
