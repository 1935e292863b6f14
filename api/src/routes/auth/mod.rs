//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - User registration and login
//! - Token refresh
//! - Logout

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use clavis_core::repositories::UserRepository;
use clavis_core::services::auth::AuthService;

/// Application state that holds shared services
pub struct AppState<U: UserRepository> {
    pub auth_service: Arc<AuthService<U>>,
}
