//! MySQL implementation of the UserRepository trait.
//!
//! This module provides the concrete implementation of credential persistence
//! using MySQL with SQLx. Emails arrive already normalized (trimmed,
//! lowercase), so the unique index on `email` enforces the case-insensitive
//! uniqueness rule without any extra query.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            CHAR(36)     NOT NULL PRIMARY KEY,
//!     name          VARCHAR(255) NOT NULL,
//!     email         VARCHAR(255) NOT NULL,
//!     phone         VARCHAR(32)  NOT NULL,
//!     address       VARCHAR(512) NOT NULL,
//!     password_hash VARCHAR(255) NOT NULL,
//!     answer_hash   VARCHAR(255) NOT NULL,
//!     is_admin      BOOLEAN      NOT NULL DEFAULT FALSE,
//!     created_at    TIMESTAMP(6) NOT NULL,
//!     updated_at    TIMESTAMP(6) NOT NULL,
//!     UNIQUE KEY uq_users_email (email)
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlDatabaseError;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use bv_core::domain::entities::user::{User, UserRole};
use bv_core::errors::{AuthError, DomainError};
use bv_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
///
/// Registration relies on the unique email index rather than a
/// check-then-insert sequence, so two concurrent registrations with the
/// same email cannot both succeed.
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    ///
    /// Maps database columns to User struct fields
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        let is_admin: bool = row
            .try_get("is_admin")
            .map_err(|e| column_error("is_admin", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            phone: row.try_get("phone").map_err(|e| column_error("phone", e))?,
            address: row
                .try_get("address")
                .map_err(|e| column_error("address", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
            answer_hash: row
                .try_get("answer_hash")
                .map_err(|e| column_error("answer_hash", e))?,
            role: UserRole::from_is_admin(is_admin),
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, phone, address,
                password_hash, answer_hash, is_admin,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        // The unique email index makes the duplicate check and the insert
        // one atomic operation. MySQL reports the collision as error 1062.
        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.address)
            .bind(&user.password_hash)
            .bind(&user.answer_hash)
            .bind(user.role.is_admin())
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate_entry(&e) {
                    return DomainError::Auth(AuthError::EmailExists);
                }
                DomainError::Internal {
                    message: format!("Failed to create user: {}", e),
                }
            })?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, phone, address,
                   password_hash, answer_hash, is_admin,
                   created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, phone, address,
                   password_hash, answer_hash, is_admin,
                   created_at, updated_at
            FROM users
            WHERE phone = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, phone, address,
                   password_hash, answer_hash, is_admin,
                   created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let now = Utc::now();

        let query = r#"
            UPDATE users SET
                name = ?,
                email = ?,
                phone = ?,
                address = ?,
                password_hash = ?,
                answer_hash = ?,
                is_admin = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.address)
            .bind(&user.password_hash)
            .bind(&user.answer_hash)
            .bind(user.role.is_admin())
            .bind(now)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        // Return the updated user with the persisted timestamp
        let mut updated_user = user;
        updated_user.updated_at = now;
        Ok(updated_user)
    }

    async fn update_password(&self, id: Uuid, new_hash: &str) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(new_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update password: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = ?
            ) as user_exists
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check user existence: {}", e),
            })?;

        let exists: i8 = result
            .try_get("user_exists")
            .map_err(|e| column_error("user_exists", e))?;

        Ok(exists == 1)
    }
}

/// Build the error for a column that failed to decode
fn column_error(column: &str, error: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, error),
    }
}

/// MySQL error 1062 (ER_DUP_ENTRY), raised here only by the unique email index
fn is_duplicate_entry(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_err) => db_err
            .try_downcast_ref::<MySqlDatabaseError>()
            .map_or(false, |mysql_err| mysql_err.number() == 1062),
        _ => false,
    }
}
