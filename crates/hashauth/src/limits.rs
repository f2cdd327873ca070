//! Size limit constants for input validation

/// Maximum length for a raw token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for the decoded ciphertext of the data segment (48KB)
/// Base64 encoding adds ~33% overhead, so 48KB decoded fits a 64KB token
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 48 * 1024;

/// Maximum length for the hex signature segment (128 characters)
/// HMAC-SHA512 produces 64 bytes, i.e. 128 hex characters
pub(crate) const MAX_SIGNATURE_LENGTH: usize = 128;

/// Nonce length shared by every supported AEAD cipher (96 bits)
pub(crate) const CIPHER_IV_LENGTH: usize = 12;

/// Authentication tag length shared by every supported AEAD cipher (128 bits)
pub(crate) const CIPHER_TAG_LENGTH: usize = 16;
