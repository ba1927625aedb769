//! Vortex Rust SDK
//!
//! Mints signed Vortex tokens locally and wraps the invitation management API.
//! Token minting lives in the `vortex-token` crate and is re-exported here.
//!
//! # Example
//!
//! ```no_run
//! use vortex::{ClientConfig, UserClaims, VortexClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VortexClient::new(
//!         "VRTX.AAAAAAAAAAAAAAAAAAAAAA.secret123",
//!         ClientConfig::default(),
//!     )?;
//!
//!     // Token for the browser widget
//!     let claims = UserClaims::new("user-123").with_email("user@example.com");
//!     let token = client.generate_jwt(&claims)?;
//!     println!("{}", token);
//!
//!     // Invitation API
//!     let invitation = client.get_invitation("inv-1").await?;
//!     println!("{:?}", invitation.status);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod invitations;

pub use client::{API_KEY_HEADER, VortexClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{Result, VortexError};
pub use invitations::{
    AcceptInvitationsRequest, Invitation, InvitationGroup, InvitationTarget, InvitationsResponse,
    TargetType,
};
pub use vortex_token::{
    Clock, FixedClock, Group, Identifier, IdentifierType, LegacyClaims, SystemClock, Token,
    TokenError, TokenMinter, UserClaims,
};
