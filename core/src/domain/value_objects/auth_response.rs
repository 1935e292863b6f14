//! Authentication response value objects for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::UserProfile;

/// Authentication response returned after successful registration or login.
///
/// Carries the client-safe user projection plus both session tokens. The
/// projection never contains the password hash or the stored refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Client-safe projection of the authenticated user
    pub user: UserProfile,

    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,
}

impl AuthResponse {
    /// Creates an authentication response from a user projection and a token pair
    pub fn new(user: UserProfile, token_pair: TokenPair) -> Self {
        Self {
            user,
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            expires_in: token_pair.access_expires_in,
        }
    }
}

/// Response to a successful token refresh.
///
/// Only a new access token is minted; the refresh token is not rotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// Newly issued JWT access token
    pub access_token: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,
}
