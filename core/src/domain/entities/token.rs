//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime (1 hour)
pub const ACCESS_TOKEN_EXPIRY_SECONDS: i64 = 3600;

/// Default refresh token lifetime (7 days)
pub const REFRESH_TOKEN_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// JWT issuer
pub const JWT_ISSUER: &str = "clavis";

/// JWT audience
pub const JWT_AUDIENCE: &str = "clavis-api";

/// Discriminates what a token may be used for.
///
/// An access token must never be honored where a refresh token is
/// required, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential authorizing a single request-authentication check
    Access,
    /// Long-lived credential exchanged for new access tokens
    Refresh,
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Subject email, carried for convenience
    pub email: String,

    /// Token purpose discriminator
    pub token_type: TokenKind,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a token of the given kind with the given
    /// lifetime in seconds.
    pub fn new(user_id: Uuid, email: &str, kind: TokenKind, lifetime_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(lifetime_seconds);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            token_type: kind,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with the given expiry windows
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
