//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository backed by a HashMap
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of live users currently stored
    pub async fn len(&self) -> usize {
        let users = self.users.read().await;
        users.values().filter(|u| !u.is_deleted()).count()
    }

    /// Check if the repository is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email == email && !u.is_deleted())
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| !u.is_deleted()).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        // Enforce the unique email constraint
        if users
            .values()
            .any(|u| u.email == user.email && !u.is_deleted())
        {
            return Err(DomainError::Auth(AuthError::DuplicateEmail));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        refresh_token: Option<&str>,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        // Missing user is a no-op, matching the partial-update semantics
        if let Some(user) = users.get_mut(&id) {
            user.refresh_token = refresh_token.map(|t| t.to_string());
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.email == email && !u.is_deleted()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(email: &str) -> User {
        User::new(
            "Jane".to_string(),
            "Roe".to_string(),
            email.to_string(),
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MockUserRepository::new();
        let user = repo.create(sample_user("jane@example.com")).await.unwrap();

        let by_email = repo.find_by_email("jane@example.com").await.unwrap();
        assert_eq!(by_email.as_ref().map(|u| u.id), Some(user.id));

        let by_id = repo.find_by_id(user.id).await.unwrap();
        assert!(by_id.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MockUserRepository::new();
        repo.create(sample_user("jane@example.com")).await.unwrap();

        let result = repo.create(sample_user("jane@example.com")).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::DuplicateEmail))
        ));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_refresh_token_partial_update() {
        let repo = MockUserRepository::new();
        let user = repo.create(sample_user("jane@example.com")).await.unwrap();

        repo.set_refresh_token(user.id, Some("tok")).await.unwrap();
        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("tok"));

        repo.set_refresh_token(user.id, None).await.unwrap();
        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_set_refresh_token_missing_user_is_noop() {
        let repo = MockUserRepository::new();
        let result = repo.set_refresh_token(Uuid::new_v4(), None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_soft_deleted_users_invisible() {
        let repo = MockUserRepository::new();
        let mut user = repo.create(sample_user("jane@example.com")).await.unwrap();

        user.deleted_at = Some(Utc::now());
        repo.update(user.clone()).await.unwrap();

        assert!(repo.find_by_email("jane@example.com").await.unwrap().is_none());
        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(!repo.exists_by_email("jane@example.com").await.unwrap());
    }
}
