//! Password hashing at the write sites.
//!
//! Hashing is an explicit call made where a plaintext password enters the
//! system (registration, future password changes), not a persistence hook.

use crate::errors::{DomainError, DomainResult};

/// Hashes a plaintext password with bcrypt and a fresh salt
pub fn hash_password(plain: &str) -> DomainResult<String> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Password hashing failed: {}", e),
    })
}

/// Compares a candidate plaintext against a stored bcrypt hash
pub fn verify_password(candidate: &str, hash: &str) -> DomainResult<bool> {
    bcrypt::verify(candidate, hash).map_err(|e| DomainError::Internal {
        message: format!("Password verification failed: {}", e),
    })
}
