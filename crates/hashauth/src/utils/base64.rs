//! Base64 decoding per RFC 4648 Section 4
//!
//! The data segment uses the standard alphabet with padding, which never
//! contains the `-` token delimiter. This module is a thin wrapper around the
//! `base64` crate with size limit validation.

use crate::error::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};

/// Decode a standard Base64 string to bytes with maximum size limit
pub(crate) fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Reject before decoding: 4 input characters yield at most 3 bytes
    if input.len() / 4 * 3 > max_size + 3 {
        return Err(Error::InvalidTokenData(format!(
            "Encoded size exceeds limit: {} bytes (max decoded: {})",
            input.len(),
            max_size
        )));
    }

    let result = STANDARD
        .decode(input)
        .map_err(|e| Error::InvalidTokenData(format!("Base64 decode failed: {e}")))?;

    if result.len() > max_size {
        return Err(Error::InvalidTokenData(format!(
            "Decoded size exceeds limit: {} bytes (max: {})",
            result.len(),
            max_size
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_invalid() {
        assert!(decode_bytes("!!!", 1000).is_err());
        // URL-safe alphabet is not accepted
        assert!(decode_bytes("SGVsbG8_", 1000).is_err());
    }

    #[test]
    fn test_decode_valid() {
        let result = decode_bytes("SGVsbG8=", 1000).unwrap();
        assert_eq!(result, b"Hello");
    }

    #[test]
    fn test_decode_with_limit() {
        let result = decode_bytes("SGVsbG8=", 10).unwrap();
        assert_eq!(result, b"Hello");

        assert!(matches!(
            decode_bytes("SGVsbG8=", 3),
            Err(Error::InvalidTokenData(_))
        ));
        assert!(decode_bytes(&"QUFB".repeat(100), 30).is_err());
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_bytes("", 1000).unwrap(), Vec::<u8>::new());
    }
}
