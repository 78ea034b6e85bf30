//! Unit tests for authentication service

use std::sync::Arc;

use crate::domain::entities::otp::OtpPurpose;
use crate::domain::entities::user::{AuthProvider, Role};
use crate::errors::{AuthError, DomainError, OtpError, ValidationError};
use crate::repositories::{
    InMemoryOtpAttemptRepository, InMemoryOtpRepository, InMemoryUserRepository, OtpRepository,
    UserRepository,
};
use crate::services::auth::{AuthService, AuthServiceConfig, LoginCredentials, SignupRequest};
use crate::services::otp::{OtpService, OtpServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};

use super::mocks::{MockEmailService, MockIdentityProvider};

type TestAuthService = AuthService<
    InMemoryUserRepository,
    InMemoryOtpRepository,
    InMemoryOtpAttemptRepository,
    MockEmailService,
    MockIdentityProvider,
>;

struct Fixture {
    users: Arc<InMemoryUserRepository>,
    otps: Arc<InMemoryOtpRepository>,
    email: Arc<MockEmailService>,
    tokens: Arc<TokenService>,
    service: TestAuthService,
}

fn fixture_with(email: MockEmailService, otp_config: OtpServiceConfig) -> Fixture {
    let users = Arc::new(InMemoryUserRepository::new());
    let otps = Arc::new(InMemoryOtpRepository::new());
    let attempts = Arc::new(InMemoryOtpAttemptRepository::new());
    let otp_service = Arc::new(OtpService::new(otps.clone(), attempts, otp_config));
    let tokens = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        ..Default::default()
    }));
    let email = Arc::new(email);
    let identity = Arc::new(MockIdentityProvider::new().with_identity("google-token", "Gia@Example.com"));

    let service = AuthService::new(
        users.clone(),
        otp_service,
        tokens.clone(),
        email.clone(),
        identity,
        AuthServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
    );

    Fixture { users, otps, email, tokens, service }
}

fn fixture() -> Fixture {
    fixture_with(MockEmailService::new(), OtpServiceConfig::default())
}

fn signup_request(email: &str, verify_token: &str) -> SignupRequest {
    SignupRequest {
        email: email.to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        password: "secret1".to_string(),
        role: Role::END_USER.to_string(),
        verify_token: verify_token.to_string(),
    }
}

/// Runs request + submit and returns the verify token
async fn verified_token(f: &Fixture, email: &str, purpose: OtpPurpose) -> String {
    f.service.request_otp(email, purpose).await.unwrap();
    let code = f.email.last_code_for(&email.trim().to_lowercase()).unwrap();
    f.service.submit_otp(email, &code, purpose).await.unwrap()
}

#[tokio::test]
async fn test_request_otp_sends_code_to_normalized_email() {
    let f = fixture();

    let result = f.service.request_otp("  Ann@Example.COM ", OtpPurpose::VerifyEmail).await.unwrap();
    assert_eq!(result.message_id, "mock-msg-1");

    let code = f.email.last_code_for("ann@example.com").unwrap();
    let pending = f
        .otps
        .find_latest_pending("ann@example.com", OtpPurpose::VerifyEmail)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pending.code, code);
}

#[tokio::test]
async fn test_request_otp_rejects_invalid_email() {
    let f = fixture();
    let result = f.service.request_otp("not-an-email", OtpPurpose::VerifyEmail).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
    assert!(f.otps.is_empty().await);
}

#[tokio::test]
async fn test_email_failure_keeps_issued_record() {
    let f = fixture_with(MockEmailService::failing(), OtpServiceConfig::default());

    let result = f.service.request_otp("a@x.com", OtpPurpose::ResetPassword).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::EmailDeliveryFailed))));

    let pending = f
        .otps
        .find_latest_pending("a@x.com", OtpPurpose::ResetPassword)
        .await
        .unwrap();
    assert!(pending.is_some());
}

#[tokio::test]
async fn test_submit_otp_rejects_malformed_code() {
    let f = fixture();
    f.service.request_otp("a@x.com", OtpPurpose::VerifyEmail).await.unwrap();

    for code in ["12345", "1234567", "12a456"] {
        let result = f.service.submit_otp("a@x.com", code, OtpPurpose::VerifyEmail).await;
        assert!(matches!(
            result,
            Err(DomainError::ValidationErr(ValidationError::InvalidCodeFormat { expected: 6 }))
        ));
    }
}

#[tokio::test]
async fn test_signup_with_verified_email() {
    let f = fixture();
    let token = verified_token(&f, "Ann@x.com", OtpPurpose::VerifyEmail).await;

    let user = f.service.signup(signup_request("ann@x.com", &token)).await.unwrap();

    assert_eq!(user.email, "ann@x.com");
    assert_eq!(user.provider, AuthProvider::Local);
    assert!(user.is_active);
    let end_user = f.users.find_role_by_name(Role::END_USER).await.unwrap().unwrap();
    assert_eq!(user.role_id, end_user.id);
    assert_ne!(user.password_hash.as_deref(), Some("secret1"));
}

#[tokio::test]
async fn test_signup_without_verified_otp() {
    let f = fixture();

    let no_record = f.service.signup(signup_request("a@x.com", "tok")).await;
    assert!(matches!(no_record, Err(DomainError::Otp(OtpError::NotFound))));

    f.service.request_otp("a@x.com", OtpPurpose::VerifyEmail).await.unwrap();
    let pending = f.service.signup(signup_request("a@x.com", "tok")).await;
    assert!(matches!(pending, Err(DomainError::Auth(AuthError::OtpNotVerified))));
    assert_eq!(f.users.user_count().await, 0);
}

#[tokio::test]
async fn test_signup_with_wrong_token() {
    let f = fixture();
    verified_token(&f, "a@x.com", OtpPurpose::VerifyEmail).await;

    let result = f.service.signup(signup_request("a@x.com", "forged")).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidVerifyToken))));
}

#[tokio::test]
async fn test_reset_token_cannot_finalize_signup() {
    let f = fixture();
    let reset_token = verified_token(&f, "a@x.com", OtpPurpose::ResetPassword).await;

    let result = f.service.signup(signup_request("a@x.com", &reset_token)).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::NotFound))));
}

#[tokio::test]
async fn test_signup_duplicate_email_and_unknown_role() {
    let f = fixture();
    let token = verified_token(&f, "a@x.com", OtpPurpose::VerifyEmail).await;

    let mut request = signup_request("a@x.com", &token);
    request.role = "owner".to_string();
    let result = f.service.signup(request).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidRole { .. }))));

    f.service.signup(signup_request("a@x.com", &token)).await.unwrap();
    let again = f.service.signup(signup_request("a@x.com", &token)).await;
    assert!(matches!(again, Err(DomainError::Auth(AuthError::EmailAlreadyExists))));
}

#[tokio::test]
async fn test_signup_short_password() {
    let f = fixture();
    let token = verified_token(&f, "a@x.com", OtpPurpose::VerifyEmail).await;

    let mut request = signup_request("a@x.com", &token);
    request.password = "abc".to_string();
    let result = f.service.signup(request).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::PasswordTooShort { min: 6 }))
    ));
}

#[tokio::test]
async fn test_password_login() {
    let f = fixture();
    let token = verified_token(&f, "a@x.com", OtpPurpose::VerifyEmail).await;
    let user = f.service.signup(signup_request("a@x.com", &token)).await.unwrap();

    let response = f
        .service
        .login(LoginCredentials::Password {
            email: "A@X.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.user_id, user.id.to_string());
    assert!(!response.is_new_user);
    let claims = f.tokens.verify_session_token(&response.access_token).unwrap();
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.role, user.role_id.to_string());
}

#[tokio::test]
async fn test_password_login_failures() {
    let f = fixture();
    let token = verified_token(&f, "a@x.com", OtpPurpose::VerifyEmail).await;
    let user = f.service.signup(signup_request("a@x.com", &token)).await.unwrap();

    let wrong_password = f
        .service
        .login(LoginCredentials::Password {
            email: "a@x.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await;
    assert!(matches!(wrong_password, Err(DomainError::Auth(AuthError::InvalidCredentials))));

    let unknown = f
        .service
        .login(LoginCredentials::Password {
            email: "nobody@x.com".to_string(),
            password: "secret1".to_string(),
        })
        .await;
    assert!(matches!(unknown, Err(DomainError::Auth(AuthError::InvalidCredentials))));

    let mut inactive = user.clone();
    inactive.is_active = false;
    f.users.put(inactive).await;
    let result = f
        .service
        .login(LoginCredentials::Password {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        })
        .await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserInactive))));
}

#[tokio::test]
async fn test_google_login_creates_then_reuses_account() {
    let f = fixture();

    let first = f
        .service
        .login(LoginCredentials::Google {
            id_token: "google-token".to_string(),
            role: Some(Role::STAFF.to_string()),
        })
        .await
        .unwrap();
    assert!(first.is_new_user);
    assert_eq!(first.email, "gia@example.com");
    let staff = f.users.find_role_by_name(Role::STAFF).await.unwrap().unwrap();
    assert_eq!(first.role_id, staff.id.to_string());

    let second = f
        .service
        .login(LoginCredentials::Google {
            id_token: "google-token".to_string(),
            role: None,
        })
        .await
        .unwrap();
    assert!(!second.is_new_user);
    assert_eq!(second.user_id, first.user_id);
    assert_eq!(f.users.user_count().await, 1);
}

#[tokio::test]
async fn test_google_login_defaults_role_and_rejects_bad_token() {
    let f = fixture();

    let response = f
        .service
        .login(LoginCredentials::Google {
            id_token: "google-token".to_string(),
            role: Some("  ".to_string()),
        })
        .await
        .unwrap();
    let end_user = f.users.find_role_by_name(Role::END_USER).await.unwrap().unwrap();
    assert_eq!(response.role_id, end_user.id.to_string());

    let rejected = f
        .service
        .login(LoginCredentials::Google {
            id_token: "forged".to_string(),
            role: None,
        })
        .await;
    assert!(matches!(rejected, Err(DomainError::Auth(AuthError::InvalidIdentityToken))));
}

#[tokio::test]
async fn test_reset_password_flow() {
    let f = fixture();
    let token = verified_token(&f, "a@x.com", OtpPurpose::VerifyEmail).await;
    f.service.signup(signup_request("a@x.com", &token)).await.unwrap();

    let reset_token = verified_token(&f, "a@x.com", OtpPurpose::ResetPassword).await;
    f.service.reset_password("a@x.com", "newsecret", &reset_token).await.unwrap();

    let old = f
        .service
        .login(LoginCredentials::Password {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        })
        .await;
    assert!(matches!(old, Err(DomainError::Auth(AuthError::InvalidCredentials))));

    f.service
        .login(LoginCredentials::Password {
            email: "a@x.com".to_string(),
            password: "newsecret".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reset_password_rejections() {
    let f = fixture();

    let unknown = f.service.reset_password("nobody@x.com", "newsecret", "tok").await;
    assert!(matches!(unknown, Err(DomainError::Auth(AuthError::EmailNotFound))));

    let token = verified_token(&f, "a@x.com", OtpPurpose::VerifyEmail).await;
    f.service.signup(signup_request("a@x.com", &token)).await.unwrap();

    // A signup token never authorizes a reset
    let cross_purpose = f.service.reset_password("a@x.com", "newsecret", &token).await;
    assert!(matches!(cross_purpose, Err(DomainError::Otp(OtpError::NotFound))));

    let reset_token = verified_token(&f, "a@x.com", OtpPurpose::ResetPassword).await;
    f.service.request_otp("a@x.com", OtpPurpose::ResetPassword).await.unwrap();
    let superseded = f.service.reset_password("a@x.com", "newsecret", &reset_token).await;
    assert!(matches!(superseded, Err(DomainError::Auth(AuthError::OtpNotVerified))));
}

#[tokio::test]
async fn test_single_use_policy_blocks_second_reset() {
    let f = fixture_with(
        MockEmailService::new(),
        OtpServiceConfig {
            single_use_verify_token: true,
            ..Default::default()
        },
    );
    let token = verified_token(&f, "a@x.com", OtpPurpose::VerifyEmail).await;
    f.service.signup(signup_request("a@x.com", &token)).await.unwrap();

    let reset_token = verified_token(&f, "a@x.com", OtpPurpose::ResetPassword).await;
    f.service.reset_password("a@x.com", "newsecret", &reset_token).await.unwrap();

    let again = f.service.reset_password("a@x.com", "another1", &reset_token).await;
    assert!(matches!(again, Err(DomainError::Otp(OtpError::AlreadyConsumed))));
}

#[tokio::test]
async fn test_default_policy_allows_token_reuse_until_superseded() {
    let f = fixture();
    let token = verified_token(&f, "a@x.com", OtpPurpose::VerifyEmail).await;
    f.service.signup(signup_request("a@x.com", &token)).await.unwrap();

    let reset_token = verified_token(&f, "a@x.com", OtpPurpose::ResetPassword).await;
    f.service.reset_password("a@x.com", "newsecret", &reset_token).await.unwrap();
    f.service.reset_password("a@x.com", "another1", &reset_token).await.unwrap();
}
