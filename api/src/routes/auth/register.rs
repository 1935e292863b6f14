use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthResponse, RegisterRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use clavis_core::repositories::UserRepository;
use clavis_core::services::auth::RegisterData;

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates a new user account and opens a session.
///
/// # Request Body
///
/// ```json
/// {
///     "first_name": "John",
///     "last_name": "Doe",
///     "email": "john@example.com",
///     "password": "password123"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// The user projection (no credential material) plus both session tokens.
///
/// ## Errors
/// - 400 Bad Request: Invalid field values
/// - 409 Conflict: Email already registered
/// - 500 Internal Server Error: Persistence failure
pub async fn register<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(&errors);
    }

    let data = RegisterData {
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        email: request.email.clone(),
        password: request.password.clone(),
    };

    match state.auth_service.register(data).await {
        Ok(response) => HttpResponse::Created().json(AuthResponse::from(response)),
        Err(error) => handle_domain_error(&error),
    }
}
