//! API key parsing.

use std::fmt;

use uuid::Uuid;
use zeroize::Zeroize;

use crate::encoding::base64url_decode;
use crate::error::{Result, TokenError};

/// Fixed prefix every API key starts with.
pub const KEY_PREFIX: &str = "VRTX";

/// Parsed components of an API key.
pub struct ParsedApiKey {
    /// The 128-bit key identifier.
    pub id: Uuid,
    /// Raw secret segment.
    secret: String,
}

impl ParsedApiKey {
    /// Get the secret segment as bytes.
    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl fmt::Debug for ParsedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedApiKey")
            .field("id", &self.id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Drop for ParsedApiKey {
    fn drop(&mut self) {
        // Clear secret from memory when dropped
        self.secret.zeroize();
    }
}

/// Parse an API key of the form `VRTX.{base64url(id)}.{secret}`.
///
/// # Returns
/// * `ParsedApiKey` containing the decoded id and the secret
/// * `InvalidKeyFormat` if the key is not three non-empty parts or the id is not base64url
/// * `InvalidKeyPrefix` if the first part isn't `VRTX`
/// * `InvalidKeyIdLength` if the id doesn't decode to exactly 16 bytes
pub fn parse(api_key: &str) -> Result<ParsedApiKey> {
    let parts: Vec<&str> = api_key.split('.').collect();
    if parts.len() != 3 {
        return Err(TokenError::InvalidKeyFormat);
    }

    let prefix = parts[0];
    let id_str = parts[1];
    let secret = parts[2];

    if prefix != KEY_PREFIX {
        return Err(TokenError::InvalidKeyPrefix {
            expected: KEY_PREFIX.to_string(),
            got: prefix.to_string(),
        });
    }

    let id_bytes = base64url_decode(id_str).map_err(|_| TokenError::InvalidKeyFormat)?;
    let id_bytes: [u8; 16] = id_bytes
        .as_slice()
        .try_into()
        .map_err(|_| TokenError::InvalidKeyIdLength(id_bytes.len()))?;

    if secret.is_empty() {
        return Err(TokenError::InvalidKeyFormat);
    }

    Ok(ParsedApiKey {
        id: Uuid::from_bytes(id_bytes),
        secret: secret.to_string(),
    })
}
