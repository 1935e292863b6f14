//! Unit tests for the token service

use uuid::Uuid;

use crate::domain::entities::token::TokenKind;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn create_test_service() -> TokenService {
    TokenService::new(TokenServiceConfig::default())
}

#[test]
fn test_issue_verify_round_trip() {
    let service = create_test_service();
    let user_id = Uuid::new_v4();

    for kind in [TokenKind::Access, TokenKind::Refresh] {
        let token = service.issue(user_id, "john@example.com", kind).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email, "john@example.com");
        assert_eq!(claims.token_type, kind);
    }
}

#[test]
fn test_issue_pair() {
    let service = create_test_service();
    let user_id = Uuid::new_v4();

    let pair = service.issue_pair(user_id, "john@example.com").unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_ne!(pair.access_token, pair.refresh_token);
    assert_eq!(pair.access_expires_in, 3600);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);

    let access = service.verify(&pair.access_token).unwrap();
    assert_eq!(access.token_type, TokenKind::Access);
    let refresh = service.verify(&pair.refresh_token).unwrap();
    assert_eq!(refresh.token_type, TokenKind::Refresh);
}

#[test]
fn test_expired_token_rejected() {
    let config = TokenServiceConfig {
        // Far enough in the past to clear the default validation leeway
        access_token_expiry: -3600,
        ..Default::default()
    };
    let service = TokenService::new(config);

    let token = service
        .issue(Uuid::new_v4(), "a@b.co", TokenKind::Access)
        .unwrap();
    let result = service.verify(&token);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_tampered_token_rejected() {
    let service = create_test_service();
    let token = service
        .issue(Uuid::new_v4(), "a@b.co", TokenKind::Access)
        .unwrap();

    // Flip a character in the signature segment
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let result = service.verify(&tampered);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}

#[test]
fn test_wrong_secret_rejected() {
    let service = create_test_service();
    let other = TokenService::new(TokenServiceConfig {
        secret: "a-different-secret".to_string(),
        ..Default::default()
    });

    let token = service
        .issue(Uuid::new_v4(), "a@b.co", TokenKind::Access)
        .unwrap();

    assert!(other.verify(&token).is_err());
}

#[test]
fn test_garbage_token_rejected() {
    let service = create_test_service();

    for garbage in ["", "not-a-token", "a.b", "a.b.c.d"] {
        let result = service.verify(garbage);
        assert!(
            matches!(result, Err(DomainError::Token(TokenError::InvalidTokenFormat))),
            "expected rejection for {:?}",
            garbage
        );
    }
}

#[test]
fn test_decode_unchecked_ignores_signature_and_expiry() {
    let service = create_test_service();
    let other = TokenService::new(TokenServiceConfig {
        secret: "a-different-secret".to_string(),
        access_token_expiry: -3600,
        ..Default::default()
    });

    // Signed with another secret and already expired: verify refuses it,
    // decode_unchecked still reads the payload.
    let user_id = Uuid::new_v4();
    let token = other.issue(user_id, "a@b.co", TokenKind::Access).unwrap();

    assert!(service.verify(&token).is_err());

    let claims = service.decode_unchecked(&token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.token_type, TokenKind::Access);
}

#[test]
fn test_decode_unchecked_rejects_non_tokens() {
    let service = create_test_service();

    assert!(service.decode_unchecked("").is_none());
    assert!(service.decode_unchecked("not-a-token").is_none());
    assert!(service.decode_unchecked("a.b.c").is_none());
}

#[test]
fn test_configured_lifetimes_embedded() {
    let config = TokenServiceConfig {
        access_token_expiry: 120,
        refresh_token_expiry: 240,
        ..Default::default()
    };
    let service = TokenService::new(config);

    let token = service
        .issue(Uuid::new_v4(), "a@b.co", TokenKind::Access)
        .unwrap();
    let claims = service.verify(&token).unwrap();
    assert_eq!(claims.exp - claims.iat, 120);

    let token = service
        .issue(Uuid::new_v4(), "a@b.co", TokenKind::Refresh)
        .unwrap();
    let claims = service.verify(&token).unwrap();
    assert_eq!(claims.exp - claims.iat, 240);
}
