//! Error types for the Vortex client

use thiserror::Error;
use vortex_token::TokenError;

/// Errors that can occur when using the Vortex client
#[derive(Error, Debug)]
pub enum VortexError {
    /// Minting failed (malformed API key or missing claim)
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Request could not be sent or the response could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to serialize/deserialize a request or response body
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration values are unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for Vortex client operations
pub type Result<T> = std::result::Result<T, VortexError>;
