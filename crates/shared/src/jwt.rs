//! JWT session token issuance and verification.
//!
//! Tokens are compact HS256 JWTs signed with a key derived from the
//! configured secret. Verification never reports *why* a token was rejected
//! to its caller: a bad signature, a malformed token, and an expired token
//! all come back as `None`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use tracing::debug;

use crate::auth::SessionClaims;

/// Default session lifetime: 7 days.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Session token lifetime in seconds.
    pub ttl_secs: i64,
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token lifetime must be positive.
    #[error("token lifetime must be positive, got {0}s")]
    InvalidLifetime(i64),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl", &self.ttl)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::InvalidLifetime` if the TTL is not positive or is
    /// too large to place an expiry on the calendar.
    pub fn new(config: JwtConfig) -> Result<Self, JwtError> {
        let invalid = || JwtError::InvalidLifetime(config.ttl_secs);
        if config.ttl_secs <= 0 {
            return Err(invalid());
        }
        let ttl = Duration::try_seconds(config.ttl_secs).ok_or_else(invalid)?;
        Utc::now().checked_add_signed(ttl).ok_or_else(invalid)?;

        Ok(Self {
            ttl,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        })
    }

    /// Issues a session token for a user, valid from now for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if signing fails.
    pub fn issue_token(&self, user_id: &str, email: &str) -> Result<String, JwtError> {
        self.issue_token_at(user_id, email, Utc::now())
    }

    /// Issues a session token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::InvalidLifetime` if the expiry would overflow the
    /// calendar, or `JwtError::EncodingError` if signing fails.
    pub fn issue_token_at(
        &self,
        user_id: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = SessionClaims::new(user_id, email, now, self.ttl)
            .ok_or(JwtError::InvalidLifetime(self.ttl.num_seconds()))?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Verifies a token against the current time.
    ///
    /// Returns `None` for any failure; callers treat that as unauthenticated.
    #[must_use]
    pub fn verify_token(&self, token: &str) -> Option<SessionClaims> {
        self.verify_token_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`.
    #[must_use]
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Option<SessionClaims> {
        match self.decode_claims(token, now) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(error = %e, "Rejected session token");
                None
            }
        }
    }

    /// Returns the session lifetime in seconds.
    #[must_use]
    pub const fn expires_in(&self) -> i64 {
        self.ttl.num_seconds()
    }

    fn decode_claims(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, JwtError> {
        // Expiry is checked below against the supplied clock, with no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::DecodingError(e.to_string()))?;

        if claims.is_valid_at(now.timestamp()) {
            Ok(claims)
        } else {
            Err(JwtError::Expired)
        }
    }
}
