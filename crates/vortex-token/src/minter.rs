//! Token minting.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::claims::{LegacyClaims, TokenPayload, UserClaims, expires_at};
use crate::encoding::{base64url_encode, render_canonical_id, to_canonical_json};
use crate::error::Result;
use crate::parse::{ParsedApiKey, parse};
use crate::sign::SigningKey;

/// Signing scheme announced in the header.
pub const ALGORITHM: &str = "HS256";
/// Token format announced in the header.
pub const TOKEN_TYPE: &str = "JWT";

/// Token header. Field order is `iat, alg, typ, kid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenHeader {
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "alg")]
    pub algorithm: &'static str,
    #[serde(rename = "typ")]
    pub token_type: &'static str,
    #[serde(rename = "kid")]
    pub key_id: String,
}

/// A signed `header.payload.signature` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    issued_at: i64,
    expires_at: i64,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// When verifiers stop accepting the token.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Mints tokens for a single API key.
///
/// The signing key is derived once on construction; the minter is immutable
/// and can be shared across threads.
#[derive(Debug)]
pub struct TokenMinter {
    key_id: Uuid,
    canonical_id: String,
    signing_key: SigningKey,
}

impl TokenMinter {
    /// Parse `api_key` and derive its signing key.
    pub fn new(api_key: &str) -> Result<Self> {
        let parsed = parse(api_key)?;
        Ok(Self::from_parsed(&parsed))
    }

    pub fn from_parsed(parsed: &ParsedApiKey) -> Self {
        let canonical_id = render_canonical_id(parsed.id.as_bytes());
        let signing_key = SigningKey::derive(parsed.secret(), &canonical_id);
        Self {
            key_id: parsed.id,
            canonical_id,
            signing_key,
        }
    }

    pub fn key_id(&self) -> Uuid {
        self.key_id
    }

    /// Canonical hyphenated form of the key id, as used for `kid`.
    pub fn canonical_id(&self) -> &str {
        &self.canonical_id
    }

    pub fn header(&self, now: i64) -> TokenHeader {
        TokenHeader {
            issued_at: now,
            algorithm: ALGORITHM,
            token_type: TOKEN_TYPE,
            key_id: self.canonical_id.clone(),
        }
    }

    /// Mint a user-shape token issued at `now`.
    pub fn mint_user(&self, claims: &UserClaims, now: i64) -> Result<Token> {
        let payload = TokenPayload::for_user(claims, now)?;
        self.sign(&payload, now)
    }

    /// Mint a legacy-shape token issued at `now`.
    pub fn mint_legacy(&self, claims: &LegacyClaims, now: i64) -> Result<Token> {
        let payload = TokenPayload::for_legacy(claims, now)?;
        self.sign(&payload, now)
    }

    /// Encode `header.payload` and append its signature.
    pub fn sign(&self, payload: &TokenPayload, now: i64) -> Result<Token> {
        let expires_at = expires_at(now)?;
        let header_b64 = base64url_encode(&to_canonical_json(&self.header(now))?);
        let payload_b64 = base64url_encode(&to_canonical_json(payload)?);

        let signing_input = format!("{}.{}", header_b64, payload_b64);
        let signature = self.signing_key.sign(signing_input.as_bytes());

        log::debug!("minted token for key {} (iat={})", self.key_id, now);

        Ok(Token {
            value: format!("{}.{}", signing_input, base64url_encode(&signature)),
            issued_at: now,
            expires_at,
        })
    }
}

/// Mint a user-shape token straight from an API key.
///
/// Key and claims are validated before any key derivation happens.
pub fn mint_user(api_key: &str, claims: &UserClaims, now: i64) -> Result<Token> {
    let parsed = parse(api_key)?;
    let payload = TokenPayload::for_user(claims, now)?;
    TokenMinter::from_parsed(&parsed).sign(&payload, now)
}

/// Mint a legacy-shape token straight from an API key.
pub fn mint_legacy(api_key: &str, claims: &LegacyClaims, now: i64) -> Result<Token> {
    let parsed = parse(api_key)?;
    let payload = TokenPayload::for_legacy(claims, now)?;
    TokenMinter::from_parsed(&parsed).sign(&payload, now)
}
