//! Errors for hashauth

use thiserror::Error;

/// Token parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Malformed token: expected data and signature separated by '-'")]
    MalformedToken,

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    InvalidSignature,

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("Invalid token data: {0}")]
    InvalidTokenData(String),

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Claim '{0}' does not exist in request data")]
    ClaimNotFound(String),

    #[error("No validator registered for claim '{0}'")]
    ClaimValidatorMissing(String),

    #[error("Claim '{claim}' rejected: {reason}")]
    ClaimRejected { claim: String, reason: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),
}

impl Error {
    /// Build a [`Error::ClaimRejected`] for use inside claim validators
    pub fn claim_rejected(claim: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ClaimRejected {
            claim: claim.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for hashauth operations
pub type Result<T> = std::result::Result<T, Error>;
