//! Local minting of signed Vortex authentication tokens.
//!
//! This crate provides functionality for:
//! - Parsing `VRTX.{id}.{secret}` API keys
//! - Deriving a per-key HMAC-SHA256 signing key
//! - Building the header and payload in their exact canonical byte layout
//! - Signing and emitting the compact `header.payload.signature` token
//!
//! Every other Vortex SDK produces the same bytes for the same inputs, so the
//! field order of header and payload is part of the format.
//!
//! # Token Format
//!
//! ```text
//! base64url({"iat":..,"alg":"HS256","typ":"JWT","kid":"<uuid>"})
//!   . base64url({"userId":..,"userEmail":..,..,"expires":..})
//!   . base64url(HMAC-SHA256(HMAC-SHA256(secret, kid), signing input))
//! ```
//!
//! # Example
//!
//! ```rust
//! use vortex_token::{TokenMinter, UserClaims};
//!
//! let minter = TokenMinter::new("VRTX.AAAAAAAAAAAAAAAAAAAAAA.secret123").unwrap();
//! let claims = UserClaims::new("user-123").with_email("user@example.com");
//! let token = minter.mint_user(&claims, 1_700_000_000).unwrap();
//!
//! assert_eq!(token.as_str().split('.').count(), 3);
//! ```

mod claims;
mod clock;
mod encoding;
mod error;
mod minter;
mod parse;
mod sign;

// Public re-exports
pub use claims::{
    Group, Identifier, IdentifierType, LegacyClaims, TOKEN_TTL_SECS, TokenPayload, UserClaims,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use encoding::{base64url_decode, base64url_encode, render_canonical_id, to_canonical_json};
pub use error::{Result, TokenError};
pub use minter::{
    ALGORITHM, TOKEN_TYPE, Token, TokenHeader, TokenMinter, mint_legacy, mint_user,
};
pub use parse::{KEY_PREFIX, ParsedApiKey, parse};
pub use sign::SigningKey;
