//! Algorithm identifiers for token encryption and signing
use crate::error::{Error, Result};
use crate::limits::{CIPHER_IV_LENGTH, CIPHER_TAG_LENGTH};
use std::str::FromStr;

/// Symmetric cipher used to encrypt the data segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherAlgorithm {
    Aes128Gcm,
    Aes256Gcm,
    ChaCha20Poly1305,
}

impl CipherAlgorithm {
    /// Convert to the canonical identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            CipherAlgorithm::Aes128Gcm => "aes-128-gcm",
            CipherAlgorithm::Aes256Gcm => "aes-256-gcm",
            CipherAlgorithm::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }

    /// Required key length in bytes
    pub const fn key_size(&self) -> usize {
        match self {
            CipherAlgorithm::Aes128Gcm => 16,
            CipherAlgorithm::Aes256Gcm | CipherAlgorithm::ChaCha20Poly1305 => 32,
        }
    }

    /// Required IV (nonce) length in bytes
    pub const fn iv_size(&self) -> usize {
        CIPHER_IV_LENGTH
    }

    /// Authentication tag length in bytes
    pub const fn tag_size(&self) -> usize {
        CIPHER_TAG_LENGTH
    }

    /// Check that key material fits this algorithm
    pub(crate) fn validate_material(&self, key: &[u8], iv: &[u8]) -> Result<()> {
        if key.len() != self.key_size() {
            return Err(Error::ConfigurationInvalid(format!(
                "{self} requires a {} byte key, got {} bytes",
                self.key_size(),
                key.len()
            )));
        }
        if iv.len() != self.iv_size() {
            return Err(Error::ConfigurationInvalid(format!(
                "{self} requires a {} byte IV, got {} bytes",
                self.iv_size(),
                iv.len()
            )));
        }
        Ok(())
    }
}

impl FromStr for CipherAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aes-128-gcm" | "aes128gcm" => Ok(CipherAlgorithm::Aes128Gcm),
            "aes-256-gcm" | "aes256gcm" => Ok(CipherAlgorithm::Aes256Gcm),
            "chacha20-poly1305" | "chacha20poly1305" => Ok(CipherAlgorithm::ChaCha20Poly1305),
            _ => Err(Error::ConfigurationInvalid(format!(
                "Cipher algorithm '{s}' is not supported"
            ))),
        }
    }
}

impl std::fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keyed MAC used to sign the data segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// HMAC with SHA-256
    #[default]
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,
}

impl SignatureAlgorithm {
    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::HS256 => "HS256",
            SignatureAlgorithm::HS384 => "HS384",
            SignatureAlgorithm::HS512 => "HS512",
        }
    }

    /// MAC output length in bytes
    pub const fn output_size(&self) -> usize {
        match self {
            SignatureAlgorithm::HS256 => 32,
            SignatureAlgorithm::HS384 => 48,
            SignatureAlgorithm::HS512 => 64,
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HS256" | "HMAC-SHA256" => Ok(SignatureAlgorithm::HS256),
            "HS384" | "HMAC-SHA384" => Ok(SignatureAlgorithm::HS384),
            "HS512" | "HMAC-SHA512" => Ok(SignatureAlgorithm::HS512),
            _ => Err(Error::ConfigurationInvalid(format!(
                "Signature algorithm '{s}' is not supported"
            ))),
        }
    }
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
