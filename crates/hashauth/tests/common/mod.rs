//! Token issuance for tests
//!
//! A fluent builder that seals `{"data", "claims"}` documents the same way a
//! matching issuer does, plus helpers to tamper with the resulting tokens.
//!
//! ```rust,ignore
//! let token = TokenBuilder::new()
//!     .data(json!({ "user": "alice" }))
//!     .claim("role", json!("admin"))
//!     .generate();
//! ```

#![allow(dead_code)]

use base64::{Engine, engine::general_purpose::STANDARD};
use hashauth::{CipherAlgorithm, SignatureAlgorithm, StaticKeys};
use hmac::{Hmac, Mac};
use serde_json::{Map, Value, json};
use sha2::{Sha256, Sha384, Sha512};

pub const SIGNING_KEY: &[u8] = b"test-signing-secret";
pub const CIPHER_KEY_256: [u8; 32] = [0x42; 32];
pub const CIPHER_KEY_128: [u8; 16] = [0x24; 16];
pub const CIPHER_IV: [u8; 12] = [0x11; 12];

/// Key material matching [`TokenBuilder`] defaults for a cipher
pub fn keys(algorithm: CipherAlgorithm) -> StaticKeys {
    StaticKeys::new(SIGNING_KEY, algorithm, cipher_key(algorithm), CIPHER_IV)
        .expect("valid test key material")
}

pub fn cipher_key(algorithm: CipherAlgorithm) -> Vec<u8> {
    match algorithm {
        CipherAlgorithm::Aes128Gcm => CIPHER_KEY_128.to_vec(),
        CipherAlgorithm::Aes256Gcm | CipherAlgorithm::ChaCha20Poly1305 => CIPHER_KEY_256.to_vec(),
    }
}

/// Route tracing output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builder for test tokens
pub struct TokenBuilder {
    cipher: CipherAlgorithm,
    signature: SignatureAlgorithm,
    signing_key: Vec<u8>,
    data: Value,
    claims: Map<String, Value>,
}

impl TokenBuilder {
    pub fn new() -> Self {
        Self {
            cipher: CipherAlgorithm::Aes256Gcm,
            signature: SignatureAlgorithm::HS256,
            signing_key: SIGNING_KEY.to_vec(),
            data: Value::Null,
            claims: Map::new(),
        }
    }

    pub fn cipher(mut self, cipher: CipherAlgorithm) -> Self {
        self.cipher = cipher;
        self
    }

    pub fn signature(mut self, signature: SignatureAlgorithm) -> Self {
        self.signature = signature;
        self
    }

    pub fn signing_key(mut self, key: &[u8]) -> Self {
        self.signing_key = key.to_vec();
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn claim(mut self, name: &str, expected: Value) -> Self {
        self.claims.insert(name.to_string(), expected);
        self
    }

    /// Seal and sign the document
    pub fn generate(self) -> String {
        let plaintext = json!({ "data": self.data, "claims": self.claims }).to_string();
        self.generate_raw(plaintext.as_bytes())
    }

    /// Seal and sign an arbitrary plaintext
    pub fn generate_raw(&self, plaintext: &[u8]) -> String {
        let ciphertext = seal(self.cipher, plaintext);
        let data_segment = STANDARD.encode(ciphertext);
        let signature = sign(self.signature, &data_segment, &self.signing_key);
        format!("{data_segment}-{signature}")
    }
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn seal(cipher: CipherAlgorithm, plaintext: &[u8]) -> Vec<u8> {
    let key = cipher_key(cipher);
    match cipher {
        CipherAlgorithm::Aes128Gcm => {
            use aes_gcm::{
                Aes128Gcm, Nonce,
                aead::{Aead, KeyInit},
            };
            Aes128Gcm::new_from_slice(&key)
                .unwrap()
                .encrypt(Nonce::from_slice(&CIPHER_IV), plaintext)
                .unwrap()
        }
        CipherAlgorithm::Aes256Gcm => {
            use aes_gcm::{
                Aes256Gcm, Nonce,
                aead::{Aead, KeyInit},
            };
            Aes256Gcm::new_from_slice(&key)
                .unwrap()
                .encrypt(Nonce::from_slice(&CIPHER_IV), plaintext)
                .unwrap()
        }
        CipherAlgorithm::ChaCha20Poly1305 => {
            use chacha20poly1305::{
                ChaCha20Poly1305, Nonce,
                aead::{Aead, KeyInit},
            };
            ChaCha20Poly1305::new_from_slice(&key)
                .unwrap()
                .encrypt(Nonce::from_slice(&CIPHER_IV), plaintext)
                .unwrap()
        }
    }
}

pub fn sign(algorithm: SignatureAlgorithm, data_segment: &str, key: &[u8]) -> String {
    let bytes = match algorithm {
        SignatureAlgorithm::HS256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).unwrap();
            mac.update(data_segment.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        SignatureAlgorithm::HS384 => {
            let mut mac = Hmac::<Sha384>::new_from_slice(key).unwrap();
            mac.update(data_segment.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        SignatureAlgorithm::HS512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key).unwrap();
            mac.update(data_segment.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
    };
    hex::encode(bytes)
}

/// Split a token into its data and signature segments
pub fn segments(token: &str) -> (&str, &str) {
    token.split_once('-').expect("token has a delimiter")
}

/// Flip one bit of the signature segment while keeping it valid hex
pub fn corrupt_signature(token: &str) -> String {
    let (data, signature) = segments(token);
    let mut bytes = hex::decode(signature).unwrap();
    bytes[0] ^= 0x01;
    format!("{data}-{}", hex::encode(bytes))
}

/// Flip one bit of the ciphertext and re-sign, so only decryption can fail
pub fn corrupt_ciphertext(token: &str) -> String {
    let (data, _) = segments(token);
    let mut ciphertext = STANDARD.decode(data).unwrap();
    ciphertext[0] ^= 0x01;
    let data_segment = STANDARD.encode(ciphertext);
    let signature = sign(SignatureAlgorithm::HS256, &data_segment, SIGNING_KEY);
    format!("{data_segment}-{signature}")
}
