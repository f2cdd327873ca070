//! Basic example parsing a token against two request contexts
//!
//! Run with `RUST_LOG=debug` to see the pipeline stages.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use hashauth::*;
use hmac::{Hmac, Mac};
use serde_json::{Value, json};
use sha2::Sha256;

const SIGNING_KEY: &[u8] = b"example-signing-secret";
const CIPHER_KEY: [u8; 32] = [0x42; 32];
const CIPHER_IV: [u8; 12] = [0x11; 12];

/// Stand-in for the issuing service: seal the document, then sign it
fn issue(document: &Value) -> String {
    let cipher = Aes256Gcm::new_from_slice(&CIPHER_KEY).expect("32 byte key");
    let plaintext = document.to_string();
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&CIPHER_IV), plaintext.as_bytes())
        .expect("encryption");
    let data = STANDARD.encode(ciphertext);

    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(SIGNING_KEY).expect("any key length");
    mac.update(data.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    format!("{data}-{signature}")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== hashauth - Basic Example ===\n");

    // In a real application the token arrives from a client
    let token = issue(&json!({
        "data": { "user": "alice" },
        "claims": { "role": "admin" }
    }));
    println!("Token: {token}\n");

    let keys = StaticKeys::new(
        SIGNING_KEY,
        CipherAlgorithm::Aes256Gcm,
        CIPHER_KEY,
        CIPHER_IV,
    )?;
    let parser = TokenParser::new(keys).claim("role", Equals).build();
    println!("Parser: {parser:?}\n");

    let admin = RequestContext::new().with("role", "admin");
    let data = parser.parse(&token, &admin)?;
    println!("  ✓ role=admin accepted, data: {data}");

    let user = RequestContext::new().with("role", "user");
    match parser.parse(&token, &user) {
        Ok(data) => println!("  ✗ role=user unexpectedly accepted: {data}"),
        Err(e) => println!("  ✓ role=user rejected: {e}"),
    }

    Ok(())
}
