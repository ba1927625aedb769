//! Error types for token minting.

use thiserror::Error;

/// Errors that can occur while minting a token.
///
/// All of these describe caller misconfiguration. None of them is transient.
#[derive(Debug, Error)]
pub enum TokenError {
    /// API key does not have three non-empty `.`-separated parts, or the id
    /// part is not valid base64url.
    #[error("Invalid API key format")]
    InvalidKeyFormat,

    /// API key prefix doesn't match the expected value
    #[error("Invalid API key prefix: expected '{expected}', got '{got}'")]
    InvalidKeyPrefix { expected: String, got: String },

    /// The decoded key id is not 16 bytes long
    #[error("Invalid API key id length: expected 16 bytes, got {0}")]
    InvalidKeyIdLength(usize),

    /// A claim required by the payload shape was not supplied
    #[error("Missing required claim: {0}")]
    MissingRequiredClaim(&'static str),

    /// Issue time is so late that `iat + ttl` overflows
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Input is not valid base64url
    #[error("Invalid base64url encoding")]
    InvalidEncoding,

    /// JSON serialization of the header or payload failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;
