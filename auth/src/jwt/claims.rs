use std::collections::HashMap;
use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Distinguishes short-lived access tokens from renewal-only refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// JWT claims issued by the authenticator.
///
/// `sub`, `iat` and `token_type` are always present; `exp` is optional and
/// additional fields (such as `username`) go through the `extra` map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Token kind
    #[serde(rename = "token_type")]
    pub kind: TokenKind,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims of the given kind issued now.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `kind` - Access or refresh
    /// * `lifetime` - Time until expiry, or `None` for a non-expiring token
    pub fn new(subject: impl ToString, kind: TokenKind, lifetime: Option<Duration>) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: lifetime.map(|lifetime| (now + lifetime).timestamp()),
            kind,
            extra: HashMap::new(),
        }
    }

    /// Access token claims carrying the username.
    pub fn for_user(user_id: impl ToString, username: &str, lifetime: Option<Duration>) -> Self {
        Self::new(user_id, TokenKind::Access, lifetime).with_extra("username", username)
    }

    /// Refresh token claims. Only the subject is carried.
    pub fn for_refresh(user_id: impl ToString, lifetime: Duration) -> Self {
        Self::new(user_id, TokenKind::Refresh, Some(lifetime))
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Get username from extra fields (convenience method).
    pub fn username(&self) -> Option<&str> {
        self.extra.get("username").and_then(|v| v.as_str())
    }
}
