//! Main authentication service implementation

use std::sync::Arc;

use sr_shared::utils::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::otp::{OtpPurpose, CODE_LENGTH};
use crate::domain::entities::user::{AuthProvider, Role, User};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, OtpError, ValidationError};
use crate::repositories::{OtpAttemptRepository, OtpRepository, UserRepository};
use crate::services::otp::OtpService;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};
use super::traits::{EmailServiceTrait, IdentityProviderTrait};
use super::types::{LoginCredentials, OtpRequestResult, SignupRequest, VerifiedIdentity};

/// Authentication service for the account flows
pub struct AuthService<U, O, A, E, I>
where
    U: UserRepository,
    O: OtpRepository,
    A: OtpAttemptRepository,
    E: EmailServiceTrait,
    I: IdentityProviderTrait,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// OTP issuer, validator and verify-token exchange
    otp_service: Arc<OtpService<O, A>>,
    /// Session token signing
    token_service: Arc<TokenService>,
    /// Outbound OTP email
    email_service: Arc<E>,
    /// Google ID token verification
    identity_provider: Arc<I>,
    config: AuthServiceConfig,
}

impl<U, O, A, E, I> AuthService<U, O, A, E, I>
where
    U: UserRepository,
    O: OtpRepository,
    A: OtpAttemptRepository,
    E: EmailServiceTrait,
    I: IdentityProviderTrait,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        otp_service: Arc<OtpService<O, A>>,
        token_service: Arc<TokenService>,
        email_service: Arc<E>,
        identity_provider: Arc<I>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            otp_service,
            token_service,
            email_service,
            identity_provider,
            config,
        }
    }

    /// Issue an OTP for `email` and send it
    ///
    /// A failed send keeps the issued record; the caller may simply request
    /// another code.
    pub async fn request_otp(&self, email: &str, purpose: OtpPurpose) -> DomainResult<OtpRequestResult> {
        let email = Self::validated_email(email)?;
        let issued = self.otp_service.issue_otp(&email, purpose).await?;

        let message_id = self
            .email_service
            .send_otp_email(&email, &issued.code, purpose)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&email),
                    purpose = %purpose,
                    otp_id = issued.otp_id,
                    error = %e,
                    event = "otp_email_failed",
                    "Failed to deliver OTP email"
                );
                OtpError::EmailDeliveryFailed
            })?;

        tracing::info!(
            email = %mask_email(&email),
            purpose = %purpose,
            message_id = %message_id,
            event = "otp_email_sent",
            "OTP email sent"
        );

        Ok(OtpRequestResult {
            message_id,
            expires_at: issued.expires_at,
        })
    }

    /// Validate a submitted OTP and return the verify token
    pub async fn submit_otp(&self, email: &str, code: &str, purpose: OtpPurpose) -> DomainResult<String> {
        let email = Self::validated_email(email)?;
        let code = code.trim();
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidCodeFormat { expected: CODE_LENGTH }.into());
        }

        self.otp_service.validate_otp(&email, purpose, code).await
    }

    /// Create a local account for an email address proven by OTP
    pub async fn signup(&self, request: SignupRequest) -> DomainResult<User> {
        let email = Self::validated_email(&request.email)?;
        self.check_password(&request.password)?;

        let record = self
            .otp_service
            .verify_token(&email, OtpPurpose::VerifyEmail, &request.verify_token)
            .await?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let role = self.resolve_role(&request.role).await?;
        let password_hash = self.hash(request.password).await?;

        self.otp_service.redeem_verify_token(&record).await?;

        let user = self
            .user_repository
            .create(User::new_local(
                email,
                request.first_name.trim().to_string(),
                request.last_name.trim().to_string(),
                password_hash,
                role.id,
            ))
            .await?;

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            role = %role.name,
            event = "user_signed_up",
            "Created local account"
        );

        Ok(user)
    }

    /// Sign in and issue a session token
    pub async fn login(&self, credentials: LoginCredentials) -> DomainResult<AuthResponse> {
        let (user, is_new_user) = match credentials {
            LoginCredentials::Password { email, password } => {
                (self.authenticate_password(&email, &password).await?, false)
            }
            LoginCredentials::Google { id_token, role } => {
                self.authenticate_google(&id_token, role.as_deref()).await?
            }
        };

        if !user.can_login() {
            tracing::warn!(
                user_id = %user.id,
                event = "login_inactive_user",
                "Login rejected for inactive user"
            );
            return Err(AuthError::UserInactive.into());
        }

        let token = self.token_service.issue_session_token(&user)?;

        tracing::info!(
            user_id = %user.id,
            provider = user.provider.as_str(),
            is_new_user = is_new_user,
            event = "login_success",
            "User logged in"
        );

        Ok(AuthResponse::new(token, &user, is_new_user))
    }

    /// Replace the password of an account proven by a reset OTP
    pub async fn reset_password(&self, email: &str, new_password: &str, verify_token: &str) -> DomainResult<()> {
        let email = Self::validated_email(email)?;
        self.check_password(new_password)?;

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        let record = self
            .otp_service
            .verify_token(&email, OtpPurpose::ResetPassword, verify_token)
            .await?;

        let password_hash = self.hash(new_password.to_string()).await?;

        self.otp_service.redeem_verify_token(&record).await?;

        if !self.user_repository.update_password(user.id, &password_hash).await? {
            return Err(AuthError::EmailNotFound.into());
        }

        tracing::info!(
            user_id = %user.id,
            event = "password_reset",
            "Password reset"
        );

        Ok(())
    }

    async fn authenticate_password(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = normalize_email(email);
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = match user.password_hash.clone() {
            Some(hash) => hash,
            None => return Err(AuthError::InvalidCredentials.into()),
        };

        let password = password.to_string();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?;

        if !matches {
            tracing::warn!(
                email = %mask_email(&email),
                event = "login_failed",
                "Invalid email or password"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Returns the user and whether it was created by this call
    async fn authenticate_google(&self, id_token: &str, role: Option<&str>) -> DomainResult<(User, bool)> {
        let identity: VerifiedIdentity = self
            .identity_provider
            .verify_id_token(id_token)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, event = "identity_token_rejected", "Google ID token rejected");
                AuthError::InvalidIdentityToken
            })?;

        let email = normalize_email(&identity.email);
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidIdentityToken.into());
        }

        if let Some(user) = self
            .user_repository
            .find_by_email_and_provider(&email, AuthProvider::Google)
            .await?
        {
            return Ok((user, false));
        }

        let role_name = role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(&self.config.default_role);
        let role = self.resolve_role(role_name).await?;

        let user = self
            .user_repository
            .create(User::new_google(email, identity.given_name, identity.family_name, role.id))
            .await?;

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            role = %role.name,
            event = "google_user_created",
            "Created account from Google sign-in"
        );

        Ok((user, true))
    }

    async fn resolve_role(&self, name: &str) -> DomainResult<Role> {
        self.user_repository
            .find_role_by_name(name.trim())
            .await?
            .ok_or_else(|| {
                AuthError::InvalidRole {
                    role: name.to_string(),
                }
                .into()
            })
    }

    async fn hash(&self, password: String) -> DomainResult<String> {
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
    }

    fn check_password(&self, password: &str) -> DomainResult<()> {
        if password.chars().count() < self.config.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }
        Ok(())
    }

    fn validated_email(email: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(email)
    }
}
