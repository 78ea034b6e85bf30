//! User accounts and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the account authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Email and bcrypt password
    Local,
    /// Google ID token
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }
}

impl std::str::FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            other => Err(format!("Unknown auth provider: {}", other)),
        }
    }
}

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "suspended" => Ok(UserStatus::Suspended),
            other => Err(format!("Unknown user status: {}", other)),
        }
    }
}

/// Named permission set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
}

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const STAFF: &'static str = "staff";
    pub const END_USER: &'static str = "end_user";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Normalized, unique email address
    pub email: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// bcrypt hash; absent for accounts that sign in with Google
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub role_id: Uuid,
    pub status: UserStatus,
    pub is_active: bool,
    pub phone_number: Option<String>,
    pub provider: AuthProvider,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an active account that signs in with a password
    pub fn new_local(
        email: String,
        first_name: String,
        last_name: String,
        password_hash: String,
        role_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            first_name: Some(first_name),
            last_name: Some(last_name),
            password_hash: Some(password_hash),
            role_id,
            status: UserStatus::Active,
            is_active: true,
            phone_number: None,
            provider: AuthProvider::Local,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates an active account backed by a Google identity
    pub fn new_google(
        email: String,
        first_name: Option<String>,
        last_name: Option<String>,
        role_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            first_name,
            last_name,
            password_hash: None,
            role_id,
            status: UserStatus::Active,
            is_active: true,
            phone_number: None,
            provider: AuthProvider::Google,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the account may sign in
    pub fn can_login(&self) -> bool {
        self.is_active && self.status == UserStatus::Active
    }

    /// Replaces the password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = Some(password_hash);
        self.updated_at = Utc::now();
    }

    /// Display name built from the stored name parts
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.to_string()),
            (None, Some(last)) => Some(last.to_string()),
            (None, None) => None,
        }
    }
}
