//! Mapping of domain errors to HTTP responses.
//!
//! This is the single place where error kinds become status codes. The
//! services never see HTTP; the handlers never inspect error internals
//! beyond the kind.

use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use clavis_core::errors::{AuthError, DomainError};
use clavis_shared::types::ErrorResponse;

/// Convert a domain error into the appropriate HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = match error {
        DomainError::Auth(AuthError::DuplicateEmail) => {
            (StatusCode::CONFLICT, "DUPLICATE_EMAIL")
        }
        DomainError::Auth(AuthError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        }
        DomainError::Auth(AuthError::InvalidRefreshToken) => {
            (StatusCode::UNAUTHORIZED, "INVALID_REFRESH_TOKEN")
        }
        DomainError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        DomainError::Token(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        DomainError::ValidationErr(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    };

    if status.is_server_error() {
        log::error!("request failed: {:?}", error);
        // Internal details stay out of the response body
        return HttpResponse::build(status)
            .json(ErrorResponse::new(code, "An internal error occurred"));
    }

    HttpResponse::build(status).json(ErrorResponse::new(code, error.to_string()))
}

/// Convert DTO validation failures into a 400 response
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    log::warn!("request validation failed for fields: {:?}", fields);

    HttpResponse::BadRequest().json(ErrorResponse::new(
        "VALIDATION_ERROR",
        format!("Invalid request data: {}", fields.join(", ")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clavis_core::errors::ValidationError;

    #[test]
    fn test_duplicate_email_maps_to_conflict() {
        let response = handle_domain_error(&DomainError::Auth(AuthError::DuplicateEmail));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_credentials_maps_to_unauthorized() {
        let response = handle_domain_error(&DomainError::Auth(AuthError::InvalidCredentials));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = handle_domain_error(&DomainError::ValidationErr(
            ValidationError::InvalidEmail,
        ));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_maps_to_internal() {
        let response = handle_domain_error(&DomainError::Database {
            message: "connection refused".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
