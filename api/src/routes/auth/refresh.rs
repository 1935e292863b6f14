use actix_web::{web, HttpResponse};

use crate::dto::auth::{RefreshResponse, RefreshTokenRequest};
use crate::handlers::error::handle_domain_error;

use clavis_core::repositories::UserRepository;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a valid refresh token for a new access token. The refresh
/// token itself is not rotated and remains valid until the next login or
/// logout.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "expires_in": 3600
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired, or superseded refresh token
/// - 500 Internal Server Error: Persistence failure
pub async fn refresh_token<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(response) => HttpResponse::Ok().json(RefreshResponse::from(response)),
        Err(error) => handle_domain_error(&error),
    }
}
