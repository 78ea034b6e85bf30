//! MySQL implementation of the UserRepository trait.
//!
//! UUIDs are stored as `CHAR(36)`; enum columns hold their lowercase names.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use sr_core::domain::entities::user::{AuthProvider, Role, User};
use sr_core::errors::{AuthError, DomainError};
use sr_core::repositories::UserRepository;

use super::{column, query_failed};

const SELECT_USER: &str = r#"
    SELECT id, email, first_name, last_name, password_hash, role_id, status,
           is_active, phone_number, provider, created_at, updated_at
    FROM users
"#;

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

    fn parse_uuid(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
        let raw: String = column(row, name)?;
        Uuid::parse_str(&raw).map_err(|e| DomainError::Internal {
            message: format!("Invalid UUID in {}: {}", name, e),
        })
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let status: String = column(row, "status")?;
        let provider: String = column(row, "provider")?;

        Ok(User {
            id: Self::parse_uuid(row, "id")?,
            email: column(row, "email")?,
            first_name: column(row, "first_name")?,
            last_name: column(row, "last_name")?,
            password_hash: column(row, "password_hash")?,
            role_id: Self::parse_uuid(row, "role_id")?,
            status: status
                .parse()
                .map_err(|message| DomainError::Internal { message })?,
            is_active: column(row, "is_active")?,
            phone_number: column(row, "phone_number")?,
            provider: provider
                .parse()
                .map_err(|message| DomainError::Internal { message })?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    async fn fetch_user(&self, query: &str, binds: &[&str]) -> Result<Option<User>, DomainError> {
        let mut q = sqlx::query(query);
        for value in binds {
            q = q.bind(*value);
        }

        let row = q
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("find user"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_USER);
        self.fetch_user(&query, &[&id.to_string()]).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_USER);
        self.fetch_user(&query, &[email]).await
    }

    async fn find_by_email_and_provider(
        &self,
        email: &str,
        provider: AuthProvider,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE email = ? AND provider = ? LIMIT 1", SELECT_USER);
        self.fetch_user(&query, &[email, provider.as_str()]).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, first_name, last_name, password_hash, role_id, status,
                is_active, phone_number, provider, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(user.role_id.to_string())
            .bind(user.status.as_str())
            .bind(user.is_active)
            .bind(&user.phone_number)
            .bind(user.provider.as_str())
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::EmailAlreadyExists)
                }
                _ => DomainError::Internal {
                    message: format!("Failed to create user: {}", e),
                },
            })?;

        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_failed("update password"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM roles WHERE name = ? LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("find role"))?;

        match row {
            Some(row) => Ok(Some(Role {
                id: Self::parse_uuid(&row, "id")?,
                name: column(&row, "name")?,
            })),
            None => Ok(None),
        }
    }
}
