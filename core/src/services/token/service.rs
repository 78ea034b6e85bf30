//! Main token service implementation

use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::session::{Claims, SessionToken, SESSION_TOKEN_TYPE};
use crate::domain::entities::user::User;
use crate::errors::{DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies HMAC-signed session JWTs
///
/// The signing key comes from the injected configuration.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Sign a session token for `user`
    pub fn issue_session_token(&self, user: &User) -> DomainResult<SessionToken> {
        let lifetime = Duration::seconds(self.config.session_token_expiry_seconds);
        let claims = Claims::for_user(user, &self.config.issuer, lifetime);

        let access_token = encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user.id, "Failed to sign session token");
                TokenError::TokenGenerationFailed
            })?;

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(TokenError::TokenGenerationFailed)?;

        Ok(SessionToken {
            access_token,
            token_type: SESSION_TOKEN_TYPE.to_string(),
            expires_in: self.config.session_token_expiry_seconds,
            expires_at,
        })
    }

    /// Verify signature, issuer and expiry, returning the claims
    pub fn verify_session_token(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired.into(),
                _ => TokenError::InvalidToken.into(),
            })
    }
}
