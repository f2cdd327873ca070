//! Keyed signatures over the data segment
//!
//! The signature segment is the lowercase hex encoding of an HMAC computed over
//! the raw bytes of the data segment. Verification compares the provided segment
//! against the recomputed one in constant time and requires an exact match.

use crate::algorithm::SignatureAlgorithm;
use crate::error::{Error, Result};
use crate::limits::MAX_SIGNATURE_LENGTH;

use constant_time_eq::constant_time_eq;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// Compute the hex signature of a data segment
pub(crate) fn sign(algorithm: SignatureAlgorithm, data: &str, key: &[u8]) -> Result<String> {
    let signature = match algorithm {
        SignatureAlgorithm::HS256 => compute_mac::<Hmac<Sha256>>(data, key)?,
        SignatureAlgorithm::HS384 => compute_mac::<Hmac<Sha384>>(data, key)?,
        SignatureAlgorithm::HS512 => compute_mac::<Hmac<Sha512>>(data, key)?,
    };
    Ok(hex::encode(signature))
}

/// Verify a signature segment against a data segment
///
/// Fails with [`Error::InvalidSignature`] unless the recomputed signature is
/// byte-for-byte identical to `signature`.
pub(crate) fn verify(
    algorithm: SignatureAlgorithm,
    data: &str,
    signature: &str,
    key: &[u8],
) -> Result<()> {
    if signature.len() > MAX_SIGNATURE_LENGTH {
        return Err(Error::InvalidSignature);
    }

    let expected = sign(algorithm, data, key)?;
    if signature.len() != expected.len() {
        return Err(Error::InvalidSignature);
    }

    if constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

fn compute_mac<M: Mac + KeyInit>(data: &str, key: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| Error::ConfigurationInvalid(format!("Invalid signing key: {e}")))?;
    mac.update(data.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}
