//! Invitation API request and response types.
//!
//! Only the fields the client reads are typed; anything else the API returns
//! is kept in `extra` so it survives a round trip through the CLI.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How an invitation reaches its recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Email,
    Sms,
    Username,
    Phone,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Email => "email",
            TargetType::Sms => "sms",
            TargetType::Username => "username",
            TargetType::Phone => "phone",
        }
    }
}

impl std::str::FromStr for TargetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(TargetType::Email),
            "sms" => Ok(TargetType::Sms),
            "username" => Ok(TargetType::Username),
            "phone" => Ok(TargetType::Phone),
            other => Err(format!("unknown target type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationTarget {
    #[serde(rename = "type")]
    pub target_type: TargetType,
    pub value: String,
}

impl InvitationTarget {
    pub fn new(target_type: TargetType, value: impl Into<String>) -> Self {
        Self {
            target_type,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub target: Vec<InvitationTarget>,
    #[serde(default)]
    pub groups: Vec<InvitationGroup>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// List envelope returned by the search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct InvitationsResponse {
    #[serde(default)]
    pub invitations: Vec<Invitation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationsRequest {
    pub invitation_ids: Vec<String>,
    pub target: InvitationTarget,
}
