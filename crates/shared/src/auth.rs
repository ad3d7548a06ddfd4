//! Session claims and authentication payloads.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Name of the HTTP-only cookie that mirrors the bearer token for browsers.
pub const AUTH_COOKIE: &str = "auth-token";

/// JWT claims for session tokens.
///
/// A claims value is valid only while the current time is strictly before
/// `exp`. There is no revocation: once issued, a token stays valid for its
/// whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user object ID in the content store).
    pub sub: String,
    /// User email at the time of issue.
    pub email: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl SessionClaims {
    /// Creates claims issued at `issued_at` and expiring `ttl` later.
    ///
    /// Returns `None` when the expiry falls outside the representable range.
    #[must_use]
    pub fn new(
        user_id: &str,
        email: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(ttl)?;
        Some(Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Returns true while `now` is strictly before the expiry.
    #[must_use]
    pub const fn is_valid_at(&self, now: i64) -> bool {
        self.exp > self.iat && now < self.exp
    }
}

/// Extracts the token from an `Authorization` header value.
///
/// Only the exact shape `Bearer <token>` is accepted: the scheme is
/// case-sensitive and the token must be non-empty with no whitespace.
#[must_use]
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return None;
    }
    Some(token)
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User email.
    #[serde(default)]
    pub email: String,
    /// User password.
    #[serde(default)]
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// User email.
    #[serde(default)]
    pub email: String,
    /// User password.
    #[serde(default)]
    pub password: String,
    /// Display name.
    #[serde(default, alias = "fullName")]
    pub full_name: Option<String>,
}

/// Public user profile returned by auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// User ID.
    pub id: String,
    /// User email.
    pub email: String,
    /// Display name.
    pub full_name: String,
}

/// Response for register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Authenticated user.
    pub user: UserInfo,
    /// Session token, also set as the `auth-token` cookie.
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}
