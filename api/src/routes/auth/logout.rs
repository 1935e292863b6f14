use actix_web::{web, HttpResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use clavis_core::repositories::UserRepository;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Ends the authenticated user's session by clearing the stored refresh
/// token. Idempotent: logging out with no active session also succeeds.
/// Requires authentication via Bearer token in the Authorization header.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 500 Internal Server Error: Persistence failure
pub async fn logout<U>(state: web::Data<AppState<U>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.auth_service.logout(auth.user.id).await {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
