//! User repository trait defining the interface for account persistence.
//!
//! Email addresses reach the repository already normalized; implementations
//! compare them exactly.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{AuthProvider, Role, User};
use crate::errors::DomainError;

/// Repository trait for User and Role persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by email, whatever the provider
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by email registered through a specific provider
    async fn find_by_email_and_provider(
        &self,
        email: &str,
        provider: AuthProvider,
    ) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyExists))` - The email is taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace a user's password hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password updated
    /// * `Ok(false)` - No user with that id
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError>;

    /// Find a role by its unique name
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, DomainError>;
}
