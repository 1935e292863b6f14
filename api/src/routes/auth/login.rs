use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use clavis_core::repositories::UserRepository;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates a user with email and password.
///
/// # Response
///
/// ## Success (200 OK)
/// The user projection plus a fresh token pair. Any refresh token from an
/// earlier session is superseded.
///
/// ## Errors
/// - 401 Unauthorized: Unknown email or wrong password (indistinguishable)
/// - 500 Internal Server Error: Persistence failure
pub async fn login<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthResponse::from(response)),
        Err(error) => handle_domain_error(&error),
    }
}
