//! Unit tests for user entities

use uuid::Uuid;

use crate::domain::entities::user::{AuthProvider, Role, User, UserStatus};

#[test]
fn test_new_local_user() {
    let role = Role::new(Role::END_USER);
    let user = User::new_local(
        "a@x.com".to_string(),
        "Ann".to_string(),
        "Lee".to_string(),
        "hash".to_string(),
        role.id,
    );

    assert_eq!(user.provider, AuthProvider::Local);
    assert_eq!(user.status, UserStatus::Active);
    assert!(user.can_login());
    assert_eq!(user.full_name().as_deref(), Some("Ann Lee"));
}

#[test]
fn test_new_google_user_has_no_password() {
    let user = User::new_google("g@x.com".to_string(), Some("Gia".to_string()), None, Uuid::new_v4());
    assert_eq!(user.provider, AuthProvider::Google);
    assert!(user.password_hash.is_none());
    assert_eq!(user.full_name().as_deref(), Some("Gia"));
}

#[test]
fn test_inactive_user_cannot_login() {
    let mut user = User::new_google("g@x.com".to_string(), None, None, Uuid::new_v4());
    user.is_active = false;
    assert!(!user.can_login());

    user.is_active = true;
    user.status = UserStatus::Suspended;
    assert!(!user.can_login());
}

#[test]
fn test_password_hash_not_serialized() {
    let user = User::new_local(
        "a@x.com".to_string(),
        "Ann".to_string(),
        "Lee".to_string(),
        "secret-hash".to_string(),
        Uuid::new_v4(),
    );
    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("secret-hash"));
}

#[test]
fn test_provider_and_status_parsing() {
    assert_eq!("google".parse::<AuthProvider>().unwrap(), AuthProvider::Google);
    assert!("github".parse::<AuthProvider>().is_err());
    assert_eq!("active".parse::<UserStatus>().unwrap(), UserStatus::Active);
}
