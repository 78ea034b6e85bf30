//! Configuration for the token service

use jsonwebtoken::Algorithm;
use sr_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family)
    pub algorithm: Algorithm,
    /// Issuer claim written and required on verification
    pub issuer: String,
    /// Session token lifetime in seconds
    pub session_token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: "smart-restaurant".to_string(),
            session_token_expiry_seconds: 24 * 3600,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        let algorithm = match jwt.algorithm.parse::<Algorithm>() {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => {
                tracing::warn!(
                    algorithm = %jwt.algorithm,
                    "Unsupported session token algorithm, falling back to HS256"
                );
                Algorithm::HS256
            }
        };

        Self {
            jwt_secret: jwt.secret.clone(),
            algorithm,
            issuer: jwt.issuer.clone(),
            session_token_expiry_seconds: jwt.session_token_expiry,
        }
    }
}
