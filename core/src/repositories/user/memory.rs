//! In-memory implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{AuthProvider, Role, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// In-memory user store seeded with the standard roles
#[derive(Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    roles: Arc<RwLock<Vec<Role>>>,
}

impl InMemoryUserRepository {
    /// Create a repository containing the admin, staff and end_user roles
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            roles: Arc::new(RwLock::new(vec![
                Role::new(Role::ADMIN),
                Role::new(Role::STAFF),
                Role::new(Role::END_USER),
            ])),
        }
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Overwrite a stored user, e.g. to deactivate it
    pub async fn put(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_and_provider(
        &self,
        email: &str,
        provider: AuthProvider,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email == email && u.provider == provider)
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::EmailAlreadyExists));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.password_hash = Some(password_hash.to_string());
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.iter().find(|r| r.name == name).cloned())
    }
}
