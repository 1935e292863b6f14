//! Application factory
//!
//! Builds the Actix-web application with all routes and middleware wired to
//! the injected services.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use crate::middleware::{auth::AuthGate, cors::create_cors};
use crate::routes::auth::{
    login::login, logout::logout, refresh::refresh_token, register::register, AppState,
};
use crate::routes::{me::me, session::session};

use clavis_core::repositories::UserRepository;
use clavis_core::services::token::TokenService;

/// Create and configure the application with all dependencies
pub fn create_app<U>(
    app_state: web::Data<AppState<U>>,
    token_service: Arc<TokenService>,
    user_repository: Arc<U>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
{
    let cors = create_cors();

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U>))
                        .route("/login", web::post().to(login::<U>))
                        .route("/refresh", web::post().to(refresh_token::<U>))
                        .route(
                            "/logout",
                            web::post().to(logout::<U>).wrap(AuthGate::required(
                                Arc::clone(&token_service),
                                Arc::clone(&user_repository),
                            )),
                        ),
                )
                .route(
                    "/me",
                    web::get().to(me).wrap(AuthGate::required(
                        Arc::clone(&token_service),
                        Arc::clone(&user_repository),
                    )),
                )
                .route(
                    "/session",
                    web::get().to(session).wrap(AuthGate::optional(
                        Arc::clone(&token_service),
                        Arc::clone(&user_repository),
                    )),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "clavis-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
