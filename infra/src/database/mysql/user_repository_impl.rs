//! MySQL implementation of the UserRepository trait.
//!
//! Concrete user persistence using MySQL with SQLx. Soft-deleted rows are
//! filtered out of every lookup; the partial refresh-token update touches
//! only its own column so logout never re-hashes or re-validates anything.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use clavis_core::domain::entities::user::User;
use clavis_core::errors::{AuthError, DomainError};
use clavis_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get id: {}", e),
            })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            first_name: row.try_get("first_name").map_err(|e| DomainError::Database {
                message: format!("Failed to get first_name: {}", e),
            })?,
            last_name: row.try_get("last_name").map_err(|e| DomainError::Database {
                message: format!("Failed to get last_name: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Database {
                message: format!("Failed to get email: {}", e),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            is_email_verified: row
                .try_get("is_email_verified")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get is_email_verified: {}", e),
                })?,
            refresh_token: row
                .try_get("refresh_token")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get refresh_token: {}", e),
                })?,
            last_login_at: row
                .try_get("last_login_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get last_login_at: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
            deleted_at: row
                .try_get("deleted_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get deleted_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, first_name, last_name, email, password_hash,
                   is_email_verified, refresh_token, last_login_at,
                   created_at, updated_at, deleted_at
            FROM users
            WHERE email = ? AND deleted_at IS NULL
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, first_name, last_name, email, password_hash,
                   is_email_verified, refresh_token, last_login_at,
                   created_at, updated_at, deleted_at
            FROM users
            WHERE id = ? AND deleted_at IS NULL
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        // The unique index on email backs this check; racing inserts still
        // surface as a database error below
        if self.exists_by_email(&user.email).await? {
            return Err(DomainError::Auth(AuthError::DuplicateEmail));
        }

        let query = r#"
            INSERT INTO users (
                id, first_name, last_name, email, password_hash,
                is_email_verified, refresh_token, last_login_at,
                created_at, updated_at, deleted_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_email_verified)
            .bind(&user.refresh_token)
            .bind(user.last_login_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.deleted_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to create user: {}", e),
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                first_name = ?,
                last_name = ?,
                email = ?,
                password_hash = ?,
                is_email_verified = ?,
                refresh_token = ?,
                last_login_at = ?,
                updated_at = ?,
                deleted_at = ?
            WHERE id = ?
        "#;

        let updated_at = Utc::now();
        let result = sqlx::query(query)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_email_verified)
            .bind(&user.refresh_token)
            .bind(user.last_login_at)
            .bind(updated_at)
            .bind(user.deleted_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        let mut updated_user = user;
        updated_user.updated_at = updated_at;
        Ok(updated_user)
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        refresh_token: Option<&str>,
    ) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users SET
                refresh_token = ?,
                updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
        "#;

        // Zero affected rows means no such user; the operation stays
        // idempotent either way
        sqlx::query(query)
            .bind(refresh_token)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update refresh token: {}", e),
            })?;

        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = ? AND deleted_at IS NULL
            ) as user_exists
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to check user existence: {}", e),
            })?;

        let exists: i8 = result
            .try_get("user_exists")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get existence result: {}", e),
            })?;

        Ok(exists == 1)
    }
}
