//! Decryption of the data segment
//!
//! The data segment is the base64 encoding of `ciphertext || tag`, sealed with
//! the AEAD cipher, key and IV supplied by the [`KeyStorage`](crate::KeyStorage).
//! The plaintext is a JSON document with two required fields:
//!
//! ```json
//! { "data": <any>, "claims": { "<claim>": <expected value>, ... } }
//! ```

use crate::algorithm::CipherAlgorithm;
use crate::error::{Error, Result};
use crate::limits::MAX_DECODED_PAYLOAD_SIZE;
use crate::utils::base64;

use serde::Deserialize;
use serde_json::{Map, Value};

/// The decrypted contents of a token
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecryptedPayload {
    /// Opaque payload returned to the caller after successful parsing
    pub data: Value,

    /// Expected claim values keyed by claim name
    pub claims: Map<String, Value>,
}

/// Decode, decrypt and deserialize a data segment
pub(crate) fn decrypt(
    data_segment: &str,
    algorithm: CipherAlgorithm,
    key: &[u8],
    iv: &[u8],
) -> Result<DecryptedPayload> {
    algorithm.validate_material(key, iv)?;

    let ciphertext = base64::decode_bytes(data_segment, MAX_DECODED_PAYLOAD_SIZE)?;
    if ciphertext.len() < algorithm.tag_size() {
        return Err(Error::InvalidTokenData(format!(
            "Ciphertext too short: {} bytes",
            ciphertext.len()
        )));
    }

    let plaintext = match algorithm {
        CipherAlgorithm::Aes128Gcm => open_aes128_gcm(&ciphertext, key, iv)?,
        CipherAlgorithm::Aes256Gcm => open_aes256_gcm(&ciphertext, key, iv)?,
        CipherAlgorithm::ChaCha20Poly1305 => open_chacha20_poly1305(&ciphertext, key, iv)?,
    };

    serde_json::from_slice(&plaintext)
        .map_err(|e| Error::InvalidTokenData(format!("Failed to parse payload: {e}")))
}

fn open_aes128_gcm(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    use aes_gcm::{
        Aes128Gcm, Nonce,
        aead::{Aead, KeyInit},
    };

    let cipher = Aes128Gcm::new_from_slice(key)
        .map_err(|e| Error::ConfigurationInvalid(format!("Invalid AES key: {e}")))?;

    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|e| Error::InvalidTokenData(format!("AES decryption failed: {e}")))
}

fn open_aes256_gcm(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    use aes_gcm::{
        Aes256Gcm, Nonce,
        aead::{Aead, KeyInit},
    };

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| Error::ConfigurationInvalid(format!("Invalid AES key: {e}")))?;

    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|e| Error::InvalidTokenData(format!("AES decryption failed: {e}")))
}

fn open_chacha20_poly1305(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    use chacha20poly1305::{
        ChaCha20Poly1305, Nonce,
        aead::{Aead, KeyInit},
    };

    let cipher = ChaCha20Poly1305::new_from_slice(key)
        .map_err(|e| Error::ConfigurationInvalid(format!("Invalid ChaCha20 key: {e}")))?;

    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|e| Error::InvalidTokenData(format!("ChaCha20 decryption failed: {e}")))
}
