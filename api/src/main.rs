use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use clavis_api::app::create_app;
use clavis_api::routes::auth::AppState;
use clavis_core::services::auth::AuthService;
use clavis_core::services::token::{TokenService, TokenServiceConfig};
use clavis_infra::database::connection::DatabasePool;
use clavis_infra::database::mysql::MySqlUserRepository;
use clavis_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Clavis API server");

    // Load configuration
    let config = AppConfig::from_env();
    if config.environment.is_production() && config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; refusing to run production with the default secret");
        anyhow::bail!("JWT_SECRET must be set in production");
    }

    // Initialize database connection pool
    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to create database connection pool")?;

    // Wire services with injected dependencies
    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&token_service),
    ));
    let app_state = web::Data::new(AppState {
        auth_service,
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || {
        create_app(
            app_state.clone(),
            Arc::clone(&token_service),
            Arc::clone(&user_repository),
        )
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
