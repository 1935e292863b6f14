//! User entity representing a registered account in the Clavis system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Email address, unique across all users, used as the login key
    pub email: String,

    /// Bcrypt hash of the user's password; never serialized into responses
    pub password_hash: String,

    /// Whether the user's email address has been verified
    pub is_email_verified: bool,

    /// The single active refresh token; `None` means no active session
    pub refresh_token: Option<String>,

    /// Timestamp of the user's last successful login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker; present only if the account has been removed
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new User instance. The password must already be hashed.
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            password_hash,
            is_email_verified: false,
            refresh_token: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Replaces the active refresh token
    pub fn set_refresh_token(&mut self, token: String) {
        self.refresh_token = Some(token);
        self.updated_at = Utc::now();
    }

    /// Clears the active refresh token, ending the session
    pub fn clear_refresh_token(&mut self) {
        self.refresh_token = None;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Checks if the user currently holds an active session
    pub fn has_active_session(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Checks if the account has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns the client-safe projection of this user.
    ///
    /// The projection never carries the password hash or the refresh token.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            is_email_verified: self.is_email_verified,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }
}

/// Client-safe subset of a user's fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Whether the email address has been verified
    pub is_email_verified: bool,

    /// Timestamp of the last successful login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}
