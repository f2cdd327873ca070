//! Key material consumed by the parser
//!
//! Keys are supplied by an external provider through the [`KeyStorage`] trait.
//! The parser only reads them; generation, rotation and persistence belong to
//! the provider. [`StaticKeys`] covers the common case of fixed key material.

use crate::algorithm::{CipherAlgorithm, SignatureAlgorithm};
use crate::error::{Error, Result};
use std::sync::Arc;
use zeroize::Zeroize;

/// Provider of signing and encryption key material
pub trait KeyStorage: Send + Sync {
    /// Secret used to sign the data segment
    fn signature_key(&self) -> &[u8];

    /// MAC used to sign the data segment
    fn signature_algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::default()
    }

    /// Cipher used to encrypt the data segment
    fn cipher_algorithm(&self) -> CipherAlgorithm;

    /// Secret key for the cipher
    fn cipher_key(&self) -> &[u8];

    /// Initialization vector (nonce) for the cipher
    fn cipher_iv(&self) -> &[u8];
}

impl<K: KeyStorage + ?Sized> KeyStorage for Arc<K> {
    fn signature_key(&self) -> &[u8] {
        (**self).signature_key()
    }

    fn signature_algorithm(&self) -> SignatureAlgorithm {
        (**self).signature_algorithm()
    }

    fn cipher_algorithm(&self) -> CipherAlgorithm {
        (**self).cipher_algorithm()
    }

    fn cipher_key(&self) -> &[u8] {
        (**self).cipher_key()
    }

    fn cipher_iv(&self) -> &[u8] {
        (**self).cipher_iv()
    }
}

/// Fixed key material held in memory
///
/// Secret bytes are zeroized when the value is dropped.
#[derive(Clone)]
pub struct StaticKeys {
    signature_key: Vec<u8>,
    signature_algorithm: SignatureAlgorithm,
    cipher_algorithm: CipherAlgorithm,
    cipher_key: Vec<u8>,
    cipher_iv: Vec<u8>,
}

impl StaticKeys {
    /// Create key material from raw bytes
    ///
    /// Fails with [`Error::ConfigurationInvalid`] when the cipher key or IV length
    /// does not match `cipher_algorithm`.
    pub fn new(
        signature_key: impl Into<Vec<u8>>,
        cipher_algorithm: CipherAlgorithm,
        cipher_key: impl Into<Vec<u8>>,
        cipher_iv: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let keys = Self {
            signature_key: signature_key.into(),
            signature_algorithm: SignatureAlgorithm::default(),
            cipher_algorithm,
            cipher_key: cipher_key.into(),
            cipher_iv: cipher_iv.into(),
        };
        if keys.signature_key.is_empty() {
            return Err(Error::ConfigurationInvalid(
                "Signature key must not be empty".into(),
            ));
        }
        cipher_algorithm.validate_material(&keys.cipher_key, &keys.cipher_iv)?;
        Ok(keys)
    }

    /// Create key material from hex strings and a cipher identifier
    ///
    /// # Example
    /// ```ignore
    /// let keys = StaticKeys::from_hex(
    ///     "7369676e696e67",
    ///     "aes-256-gcm",
    ///     "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
    ///     "000102030405060708090a0b",
    /// )?;
    /// ```
    pub fn from_hex(
        signature_key: &str,
        cipher_algorithm: &str,
        cipher_key: &str,
        cipher_iv: &str,
    ) -> Result<Self> {
        Self::new(
            decode_hex("signature key", signature_key)?,
            cipher_algorithm.parse()?,
            decode_hex("cipher key", cipher_key)?,
            decode_hex("cipher IV", cipher_iv)?,
        )
    }

    /// Use a different MAC for the signature segment
    pub fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = algorithm;
        self
    }
}

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value)
        .map_err(|e| Error::ConfigurationInvalid(format!("Invalid hex for {field}: {e}")))
}

impl KeyStorage for StaticKeys {
    fn signature_key(&self) -> &[u8] {
        &self.signature_key
    }

    fn signature_algorithm(&self) -> SignatureAlgorithm {
        self.signature_algorithm
    }

    fn cipher_algorithm(&self) -> CipherAlgorithm {
        self.cipher_algorithm
    }

    fn cipher_key(&self) -> &[u8] {
        &self.cipher_key
    }

    fn cipher_iv(&self) -> &[u8] {
        &self.cipher_iv
    }
}

impl std::fmt::Debug for StaticKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticKeys")
            .field("signature_algorithm", &self.signature_algorithm)
            .field("cipher_algorithm", &self.cipher_algorithm)
            .finish_non_exhaustive()
    }
}

impl Drop for StaticKeys {
    fn drop(&mut self) {
        self.signature_key.zeroize();
        self.cipher_key.zeroize();
        self.cipher_iv.zeroize();
    }
}
