//! User repository trait defining the interface for user data persistence.
//!
//! This trait is the abstraction boundary between the domain and the
//! infrastructure layers. It is async-first and surfaces every storage
//! problem as a `DomainError`, which callers propagate without retrying.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations handle the actual database access. Soft-deleted users are
/// invisible to every lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their email address, the login key.
    ///
    /// Returns `Ok(None)` when no live user carries the address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new user.
    ///
    /// Fails with `AuthError::DuplicateEmail` when the email is already
    /// registered, so the unique constraint is enforced at both levels.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist every field of an existing user.
    ///
    /// Fails with `DomainError::NotFound` when the user does not exist.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Overwrite only the stored refresh token (and the update timestamp),
    /// leaving every other column untouched.
    ///
    /// `None` clears the token. Updating a non-existent user is a no-op, so
    /// logout stays idempotent.
    async fn set_refresh_token(
        &self,
        id: Uuid,
        refresh_token: Option<&str>,
    ) -> Result<(), DomainError>;

    /// Check whether a live user exists with the given email.
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
