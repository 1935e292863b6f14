use actix_web::HttpResponse;

use crate::dto::auth::UserResponse;
use crate::middleware::auth::OptionalAuth;

/// Handler for GET /api/v1/session
///
/// Sits behind the optional authentication gate: anonymous callers get a
/// response too, with `authenticated` set to false. Handlers that differ
/// for anonymous and authenticated callers follow this pattern.
pub async fn session(auth: OptionalAuth) -> HttpResponse {
    match auth.0 {
        Some(context) => HttpResponse::Ok().json(serde_json::json!({
            "authenticated": true,
            "user": UserResponse::from(context.user.profile()),
        })),
        None => HttpResponse::Ok().json(serde_json::json!({
            "authenticated": false,
        })),
    }
}
