use actix_web::HttpResponse;

use crate::dto::auth::UserResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/me
///
/// Returns the authenticated user's profile. The identity attached by the
/// authentication gate is loaded fresh from the store, so the response
/// reflects current account state rather than token contents.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(auth.user.profile()))
}
