//! Request and response DTOs for the HTTP surface.

pub mod auth;

pub use auth::*;
