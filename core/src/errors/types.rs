//! Domain-specific error types for authentication and related operations
//!
//! This module provides error type definitions for authentication, token
//! management, and validation. Mapping to HTTP status codes happens once at
//! the presentation layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Registration attempted with an email already on file
    #[error("Email already registered")]
    DuplicateEmail,

    /// Login failed: unknown email or wrong password, indistinguishable to
    /// the caller to prevent email enumeration
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Refresh called with a token that fails verification, has the wrong
    /// kind, names an unknown user, or does not match the stored token
    #[error("Invalid refresh token")]
    InvalidRefreshToken,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Field too short: {field} (minimum length: {min})")]
    TooShort { field: String, min: usize },

    #[error("Invalid email")]
    InvalidEmail,
}
