//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::token::TokenKind;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{AccessTokenResponse, AuthResponse};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::password::{hash_password, verify_password};
use super::validation::validate_registration;

/// Fields supplied by a registration request
#[derive(Debug, Clone)]
pub struct RegisterData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Authentication service for the session lifecycle.
///
/// Owns the one stateful rule of the system: a single active refresh token
/// per user, overwritten on every login or registration and cleared on
/// logout. Dependencies are injected at construction; there is no hidden
/// process-wide state.
pub struct AuthService<U: UserRepository> {
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT issuance and verification
    token_service: Arc<TokenService>,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new authentication service
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_repository,
            token_service,
        }
    }

    /// Register a new user.
    ///
    /// This method:
    /// 1. Validates the supplied fields
    /// 2. Rejects emails already on file
    /// 3. Hashes the password and persists the new user
    /// 4. Issues an access/refresh token pair
    /// 5. Persists the refresh token (second write; no transaction spans
    ///    the two writes)
    pub async fn register(&self, data: RegisterData) -> DomainResult<AuthResponse> {
        validate_registration(&data)?;

        if self.user_repository.exists_by_email(&data.email).await? {
            return Err(AuthError::DuplicateEmail.into());
        }

        let password_hash = hash_password(&data.password)?;
        let user = User::new(data.first_name, data.last_name, data.email, password_hash);
        let user = self.user_repository.create(user).await?;

        let pair = self.token_service.issue_pair(user.id, &user.email)?;
        self.user_repository
            .set_refresh_token(user.id, Some(&pair.refresh_token))
            .await?;

        info!(user_id = %user.id, "user registered");
        Ok(AuthResponse::new(user.profile(), pair))
    }

    /// Authenticate a user with email and password.
    ///
    /// Unknown email and wrong password produce the identical
    /// `InvalidCredentials` outcome so the caller cannot enumerate
    /// registered addresses. On success both tokens are issued and the
    /// refresh token plus last-login timestamp are persisted in one write.
    /// Concurrent logins for the same user race last-write-wins on the
    /// stored refresh token.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let mut user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                warn!("login attempt for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let pair = self.token_service.issue_pair(user.id, &user.email)?;
        user.set_refresh_token(pair.refresh_token.clone());
        user.update_last_login();
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, "user logged in");
        Ok(AuthResponse::new(user.profile(), pair))
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Every failure mode — failed verification, wrong token kind, unknown
    /// user, mismatch with the stored token — maps to
    /// `InvalidRefreshToken`. A stale token is rejected even when
    /// cryptographically valid and unexpired. The refresh token itself is
    /// not rotated; it stays valid until the next login or logout.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AccessTokenResponse> {
        let claims = self
            .token_service
            .verify(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        if claims.token_type != TokenKind::Refresh {
            return Err(AuthError::InvalidRefreshToken.into());
        }

        let user_id = claims
            .user_id()
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            warn!(user_id = %user.id, "refresh attempt with superseded token");
            return Err(AuthError::InvalidRefreshToken.into());
        }

        let access_token = self
            .token_service
            .issue(user.id, &user.email, TokenKind::Access)?;

        Ok(AccessTokenResponse {
            access_token,
            expires_in: self.token_service.access_token_expiry(),
        })
    }

    /// End a user's session by clearing the stored refresh token.
    ///
    /// Idempotent: logging out twice, or with no active session, both
    /// succeed silently.
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        self.user_repository.set_refresh_token(user_id, None).await?;
        info!(user_id = %user_id, "user logged out");
        Ok(())
    }
}
