//! Vortex API client.

use std::fmt;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use vortex_token::{Clock, LegacyClaims, SystemClock, Token, TokenMinter, UserClaims};

use crate::config::ClientConfig;
use crate::error::{Result, VortexError};
use crate::invitations::{
    AcceptInvitationsRequest, Invitation, InvitationTarget, InvitationsResponse, TargetType,
};

pub const API_KEY_HEADER: &str = "x-api-key";

const INVITATIONS_PATH: [&str; 3] = ["api", "v1", "invitations"];

/// Client for one Vortex API key.
///
/// Tokens are minted locally; invitation calls go to `config.base_url` and
/// authenticate with the API key header.
pub struct VortexClient {
    api_key: String,
    minter: TokenMinter,
    config: ClientConfig,
    clock: Arc<dyn Clock + Send + Sync>,
    http: reqwest::Client,
}

impl fmt::Debug for VortexClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VortexClient")
            .field("key_id", &self.minter.key_id())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl VortexClient {
    /// Create a client. A malformed API key is rejected here.
    pub fn new(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let api_key = api_key.into();
        let minter = TokenMinter::new(&api_key)?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        log::debug!(
            "vortex client for key {} using {}",
            minter.key_id(),
            config.base_url
        );

        Ok(Self {
            api_key,
            minter,
            config,
            clock: Arc::new(SystemClock),
            http,
        })
    }

    /// Replace the time source used for `iat` and `expires`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn minter(&self) -> &TokenMinter {
        &self.minter
    }

    /// Mint a user-shape token stamped with the client's clock.
    pub fn generate_jwt(&self, claims: &UserClaims) -> Result<Token> {
        Ok(self.minter.mint_user(claims, self.clock.now())?)
    }

    /// Mint a legacy identifier/group token stamped with the client's clock.
    pub fn generate_legacy_jwt(&self, claims: &LegacyClaims) -> Result<Token> {
        Ok(self.minter.mint_legacy(claims, self.clock.now())?)
    }

    pub async fn get_invitations_by_target(
        &self,
        target_type: TargetType,
        target_value: &str,
    ) -> Result<Vec<Invitation>> {
        let mut url = self.invitations_url(&[])?;
        url.query_pairs_mut()
            .append_pair("targetType", target_type.as_str())
            .append_pair("targetValue", target_value);

        let response: InvitationsResponse = self.send_json(self.request(Method::GET, url)).await?;
        Ok(response.invitations)
    }

    pub async fn get_invitation(&self, invitation_id: &str) -> Result<Invitation> {
        let url = self.invitations_url(&[invitation_id])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    pub async fn revoke_invitation(&self, invitation_id: &str) -> Result<()> {
        let url = self.invitations_url(&[invitation_id])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    /// Accept invitations on behalf of `target`.
    pub async fn accept_invitations(
        &self,
        invitation_ids: Vec<String>,
        target: InvitationTarget,
    ) -> Result<Invitation> {
        let url = self.invitations_url(&["accept"])?;
        let body = AcceptInvitationsRequest {
            invitation_ids,
            target,
        };
        self.send_json(self.request_with_body(Method::POST, url, &body))
            .await
    }

    pub async fn get_invitations_by_group(
        &self,
        group_type: &str,
        group_id: &str,
    ) -> Result<Vec<Invitation>> {
        let url = self.invitations_url(&["by-group", group_type, group_id])?;
        let response: InvitationsResponse = self.send_json(self.request(Method::GET, url)).await?;
        Ok(response.invitations)
    }

    pub async fn delete_invitations_by_group(&self, group_type: &str, group_id: &str) -> Result<()> {
        let url = self.invitations_url(&["by-group", group_type, group_id])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    /// Resend an invitation.
    pub async fn reinvite(&self, invitation_id: &str) -> Result<Invitation> {
        let url = self.invitations_url(&[invitation_id, "reinvite"])?;
        self.send_json(self.request(Method::POST, url)).await
    }

    /// `{base_url}/api/v1/invitations/{segments..}`, each segment percent-encoded.
    fn invitations_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| VortexError::InvalidConfig(format!("base_url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| {
                VortexError::InvalidConfig(format!(
                    "base_url cannot be a base: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(INVITATIONS_PATH)
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        log::debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
    }

    fn request_with_body<B: Serialize>(&self, method: Method, url: Url, body: &B) -> RequestBuilder {
        self.request(method, url).json(body)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(message) => message,
            Err(e) => {
                log::debug!("failed to read {} response body: {}", status, e);
                String::new()
            }
        };
        log::warn!("vortex API returned {}: {}", status, message);
        Err(VortexError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let bytes = self.send(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vortex_token::{FixedClock, TokenError};

    const API_KEY: &str = "VRTX.AAAAAAAAAAAAAAAAAAAAAA.secret123";

    fn client(base_url: &str) -> VortexClient {
        VortexClient::new(API_KEY, ClientConfig::new(base_url)).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_key() {
        let result = VortexClient::new("VRTX.bad", ClientConfig::default());
        assert!(matches!(
            result,
            Err(VortexError::Token(TokenError::InvalidKeyFormat))
        ));
    }

    #[test]
    fn test_new_rejects_unparsable_base_url() {
        let result = VortexClient::new(API_KEY, ClientConfig::new("not a url"));
        assert!(matches!(result, Err(VortexError::InvalidConfig(_))));
    }

    #[test]
    fn test_generate_jwt_uses_clock() {
        let client = client("http://localhost").with_clock(Arc::new(FixedClock(1_700_000_000)));
        let claims = UserClaims::new("user-123").with_email("user@example.com");

        let token = client.generate_jwt(&claims).unwrap();
        assert_eq!(token.issued_at(), 1_700_000_000);
        assert!(token.as_str().ends_with(".evDYWmtCPBLL9_n07bjoWphZI1C8jsEbX7XjtFQh_zg"));
    }

    #[test]
    fn test_generate_legacy_requires_identifier() {
        let client = client("http://localhost");
        let result = client.generate_legacy_jwt(&LegacyClaims::new("user-123"));
        assert!(matches!(
            result,
            Err(VortexError::Token(TokenError::MissingRequiredClaim(_)))
        ));
    }

    #[test]
    fn test_invitations_url() {
        let client = client("http://localhost:8080/");
        let url = client.invitations_url(&["by-group", "work space", "ws/1"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/invitations/by-group/work%20space/ws%2F1"
        );
    }

    #[test]
    fn test_invitations_url_keeps_base_path() {
        let client = client("http://localhost:8080/proxy");
        let url = client.invitations_url(&["inv-1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/api/v1/invitations/inv-1");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = client("http://localhost");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("00000000-0000-0000-0000-000000000000"));
    }
}
