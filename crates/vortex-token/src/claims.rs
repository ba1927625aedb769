//! Claim inputs and the canonical payload layouts built from them.
//!
//! Two payload shapes exist and both are signed byte for byte by other SDKs,
//! so each has its own fixed key order:
//!
//! - user: `userId, userEmail, userName, userAvatarUrl, adminScopes,
//!   allowedEmailDomains, expires`, then extra claims in insertion order
//! - legacy: `userId, groups, role, expires, identifiers`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TokenError};

/// Lifetime of a token in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Expiry for a token issued at `issued_at`.
pub fn expires_at(issued_at: i64) -> Result<i64> {
    issued_at
        .checked_add(TOKEN_TTL_SECS)
        .ok_or(TokenError::InvalidTimestamp(issued_at))
}

/// Claims for the user-object payload shape.
#[derive(Debug, Clone, Default)]
pub struct UserClaims {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub admin_scopes: Option<Vec<String>>,
    pub allowed_email_domains: Option<Vec<String>>,
    /// Additional claims, emitted after `expires` in insertion order.
    pub extra: Map<String, Value>,
}

impl UserClaims {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    pub fn with_admin_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admin_scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_allowed_email_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_email_domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    /// Append an extra claim. Re-inserting a name keeps its first position.
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// Kind of a legacy identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    Email,
    /// Phone number
    Sms,
}

/// A typed user identifier (legacy shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: IdentifierType,
    pub value: String,
}

impl Identifier {
    pub fn email(value: impl Into<String>) -> Self {
        Self {
            kind: IdentifierType::Email,
            value: value.into(),
        }
    }

    pub fn sms(value: impl Into<String>) -> Self {
        Self {
            kind: IdentifierType::Sms,
            value: value.into(),
        }
    }
}

/// A group membership (legacy shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "type")]
    pub group_type: String,
    pub group_id: String,
    pub name: String,
}

impl Group {
    pub fn new(
        group_type: impl Into<String>,
        group_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group_type: group_type.into(),
            group_id: group_id.into(),
            name: name.into(),
        }
    }
}

/// Claims for the legacy identifier/group payload shape.
#[derive(Debug, Clone, Default)]
pub struct LegacyClaims {
    pub user_id: String,
    pub identifiers: Vec<Identifier>,
    pub groups: Vec<Group>,
    pub role: Option<String>,
}

impl LegacyClaims {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn with_identifier(mut self, identifier: Identifier) -> Self {
        self.identifiers.push(identifier);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// A payload whose key order is exactly what gets signed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenPayload(Map<String, Value>);

impl TokenPayload {
    /// Build the user-shape payload for a token issued at `issued_at`.
    pub fn for_user(claims: &UserClaims, issued_at: i64) -> Result<Self> {
        if claims.id.is_empty() {
            return Err(TokenError::MissingRequiredClaim("userId"));
        }
        let expires = expires_at(issued_at)?;

        let mut map = Map::new();
        map.insert("userId".into(), Value::from(claims.id.as_str()));
        insert_some(&mut map, "userEmail", claims.email.as_deref())?;
        insert_some(&mut map, "userName", claims.name.as_deref())?;
        insert_some(&mut map, "userAvatarUrl", claims.avatar_url.as_deref())?;
        insert_some(&mut map, "adminScopes", claims.admin_scopes.as_deref())?;
        insert_some(
            &mut map,
            "allowedEmailDomains",
            claims.allowed_email_domains.as_deref(),
        )?;
        map.insert("expires".into(), Value::from(expires));

        for (name, value) in &claims.extra {
            map.insert(name.clone(), value.clone());
        }

        Ok(Self(map))
    }

    /// Build the legacy-shape payload for a token issued at `issued_at`.
    pub fn for_legacy(claims: &LegacyClaims, issued_at: i64) -> Result<Self> {
        if claims.user_id.is_empty() {
            return Err(TokenError::MissingRequiredClaim("userId"));
        }
        if claims.identifiers.is_empty() {
            return Err(TokenError::MissingRequiredClaim("identifiers"));
        }
        let expires = expires_at(issued_at)?;

        let mut map = Map::new();
        map.insert("userId".into(), Value::from(claims.user_id.as_str()));
        map.insert("groups".into(), serde_json::to_value(&claims.groups)?);
        insert_some(&mut map, "role", claims.role.as_deref())?;
        map.insert("expires".into(), Value::from(expires));
        map.insert(
            "identifiers".into(),
            serde_json::to_value(&claims.identifiers)?,
        );

        Ok(Self(map))
    }

    /// Claim names in emission order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

// Absent claims are left out entirely, never written as `null`.
fn insert_some<T: Serialize + ?Sized>(
    map: &mut Map<String, Value>,
    name: &str,
    value: Option<&T>,
) -> Result<()> {
    if let Some(value) = value {
        map.insert(name.to_string(), serde_json::to_value(value)?);
    }
    Ok(())
}
