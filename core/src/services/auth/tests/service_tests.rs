//! Unit tests for the authentication service

use std::sync::Arc;

use crate::domain::entities::token::TokenKind;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::auth::{AuthService, RegisterData};
use crate::services::token::{TokenService, TokenServiceConfig};

fn create_test_service() -> (AuthService<MockUserRepository>, Arc<MockUserRepository>) {
    let repository = Arc::new(MockUserRepository::new());
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::default()));
    (
        AuthService::new(Arc::clone(&repository), token_service),
        repository,
    )
}

fn john() -> RegisterData {
    RegisterData {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: "john@example.com".to_string(),
        password: "password123".to_string(),
    }
}

#[tokio::test]
async fn test_register_returns_tokens_and_clean_projection() {
    let (service, _repo) = create_test_service();

    let response = service.register(john()).await.unwrap();

    assert!(!response.access_token.is_empty());
    assert!(!response.refresh_token.is_empty());
    assert_eq!(response.user.email, "john@example.com");
    assert_eq!(response.user.first_name, "John");

    // Projection hygiene: no credential material in the serialized form
    let json = serde_json::to_string(&response.user).unwrap();
    assert!(!json.contains("password"));
    assert!(!json.contains("refresh_token"));
}

#[tokio::test]
async fn test_register_persists_refresh_token() {
    let (service, repo) = create_test_service();

    let response = service.register(john()).await.unwrap();

    let stored = repo.find_by_email("john@example.com").await.unwrap().unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some(response.refresh_token.as_str()));
    // Password was hashed before the write
    assert_ne!(stored.password_hash, "password123");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (service, repo) = create_test_service();

    service.register(john()).await.unwrap();
    let result = service.register(john()).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateEmail))
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_fields() {
    let (service, repo) = create_test_service();

    let mut data = john();
    data.first_name = "J".to_string();
    assert!(matches!(
        service.register(data).await,
        Err(DomainError::ValidationErr(ValidationError::TooShort { .. }))
    ));

    let mut data = john();
    data.email = "nonsense".to_string();
    assert!(matches!(
        service.register(data).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));

    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_login_success_sets_last_login() {
    let (service, repo) = create_test_service();
    service.register(john()).await.unwrap();

    let response = service.login("john@example.com", "password123").await.unwrap();

    assert!(!response.access_token.is_empty());
    let stored = repo.find_by_email("john@example.com").await.unwrap().unwrap();
    assert!(stored.last_login_at.is_some());
    assert_eq!(stored.refresh_token.as_deref(), Some(response.refresh_token.as_str()));
}

#[tokio::test]
async fn test_login_secrecy_unknown_email_and_wrong_password_identical() {
    let (service, _repo) = create_test_service();
    service.register(john()).await.unwrap();

    let unknown = service.login("nobody@example.com", "password123").await;
    let wrong = service.login("john@example.com", "wrong-password").await;

    assert!(matches!(
        unknown,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        wrong,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_refresh_returns_new_access_token() {
    let (service, _repo) = create_test_service();
    service.register(john()).await.unwrap();

    let login = service.login("john@example.com", "password123").await.unwrap();
    let refreshed = service.refresh(&login.refresh_token).await.unwrap();

    assert!(!refreshed.access_token.is_empty());
    assert_eq!(refreshed.expires_in, 3600);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let (service, _repo) = create_test_service();

    let response = service.register(john()).await.unwrap();

    // Kind isolation: an access token must never pass where a refresh
    // token is required
    let result = service.refresh(&response.access_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_refresh_rejects_garbage_and_foreign_tokens() {
    let (service, _repo) = create_test_service();
    service.register(john()).await.unwrap();

    assert!(matches!(
        service.refresh("not-a-token").await,
        Err(DomainError::Auth(AuthError::InvalidRefreshToken))
    ));

    // Valid shape, wrong signature
    let foreign = TokenService::new(TokenServiceConfig {
        secret: "some-other-secret".to_string(),
        ..Default::default()
    });
    let stored = foreign
        .issue(uuid::Uuid::new_v4(), "john@example.com", TokenKind::Refresh)
        .unwrap();
    assert!(matches!(
        service.refresh(&stored).await,
        Err(DomainError::Auth(AuthError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_refresh_rejects_token_for_unknown_user() {
    let (service, _repo) = create_test_service();

    // Cryptographically valid, but the subject was never registered
    let codec = TokenService::new(TokenServiceConfig::default());
    let token = codec
        .issue(uuid::Uuid::new_v4(), "ghost@example.com", TokenKind::Refresh)
        .unwrap();

    let result = service.refresh(&token).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_second_login_invalidates_first_refresh_token() {
    let (service, _repo) = create_test_service();
    service.register(john()).await.unwrap();

    let first = service.login("john@example.com", "password123").await.unwrap();
    let second = service.login("john@example.com", "password123").await.unwrap();

    assert_ne!(first.refresh_token, second.refresh_token);

    // The superseded token is rejected even though it is still
    // cryptographically valid and unexpired
    assert!(matches!(
        service.refresh(&first.refresh_token).await,
        Err(DomainError::Auth(AuthError::InvalidRefreshToken))
    ));
    assert!(service.refresh(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_logout_is_idempotent_and_revokes_refresh() {
    let (service, repo) = create_test_service();
    service.register(john()).await.unwrap();

    let login = service.login("john@example.com", "password123").await.unwrap();
    let user = repo.find_by_email("john@example.com").await.unwrap().unwrap();

    service.logout(user.id).await.unwrap();
    // Second logout, and logout with no active session, both succeed
    service.logout(user.id).await.unwrap();

    assert!(matches!(
        service.refresh(&login.refresh_token).await,
        Err(DomainError::Auth(AuthError::InvalidRefreshToken))
    ));

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.refresh_token.is_none());
}

#[tokio::test]
async fn test_full_session_scenario() {
    let (service, repo) = create_test_service();

    // Register, duplicate, failed login, login, refresh
    service.register(john()).await.unwrap();
    assert!(service.register(john()).await.is_err());
    assert!(service.login("john@example.com", "wrong").await.is_err());

    let login_a = service.login("john@example.com", "password123").await.unwrap();
    assert!(service.refresh(&login_a.refresh_token).await.is_ok());

    // Second login rotates; first token dies, second lives
    let login_b = service.login("john@example.com", "password123").await.unwrap();
    assert!(service.refresh(&login_a.refresh_token).await.is_err());
    assert!(service.refresh(&login_b.refresh_token).await.is_ok());

    // Logout kills the last token
    let user = repo.find_by_email("john@example.com").await.unwrap().unwrap();
    service.logout(user.id).await.unwrap();
    assert!(service.refresh(&login_b.refresh_token).await.is_err());
}
