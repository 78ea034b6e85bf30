//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing session tokens
    pub secret: String,

    /// Session token expiry time in seconds
    pub session_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            session_token_expiry: 86400, // 24 hours
            issuer: String::from("smart-restaurant"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session token expiry in hours
    pub fn with_session_expiry_hours(mut self, hours: i64) -> Self {
        self.session_token_expiry = hours * 3600;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// One-time passcode policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpPolicyConfig {
    /// Minutes before an issued code expires
    pub code_expiration_minutes: i64,

    /// Whether a verify token may be presented only once.
    ///
    /// Off by default: a verified token stays usable until a newer code is
    /// issued for the same email and purpose.
    #[serde(default)]
    pub single_use_verify_token: bool,
}

impl Default for OtpPolicyConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 5,
            single_use_verify_token: false,
        }
    }
}

/// Google ID token verification settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleAuthConfig {
    /// Token info endpoint used to validate ID tokens
    pub tokeninfo_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_google_timeout")]
    pub timeout_secs: u64,
}

impl Default for GoogleAuthConfig {
    fn default() -> Self {
        Self {
            tokeninfo_url: String::from("https://www.googleapis.com/oauth2/v3/tokeninfo"),
            timeout_secs: default_google_timeout(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// OTP policy
    #[serde(default)]
    pub otp: OtpPolicyConfig,

    /// Google sign-in
    #[serde(default)]
    pub google: GoogleAuthConfig,

    /// bcrypt cost for password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Role assigned to users created through Google sign-in without an explicit role
    #[serde(default = "default_role")]
    pub default_role: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            otp: OtpPolicyConfig::default(),
            google: GoogleAuthConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
            default_role: default_role(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());
        let session_token_expiry = env_parse("JWT_SESSION_TOKEN_EXPIRY", defaults.jwt.session_token_expiry);
        let code_expiration_minutes =
            env_parse("OTP_EXPIRATION_MINUTES", defaults.otp.code_expiration_minutes);
        let single_use_verify_token = env_parse("OTP_SINGLE_USE_VERIFY_TOKEN", false);

        Self {
            jwt: JwtConfig {
                secret: jwt_secret,
                session_token_expiry,
                ..defaults.jwt
            },
            otp: OtpPolicyConfig {
                code_expiration_minutes,
                single_use_verify_token,
            },
            google: GoogleAuthConfig {
                tokeninfo_url: std::env::var("GOOGLE_TOKENINFO_URL")
                    .unwrap_or(defaults.google.tokeninfo_url),
                ..defaults.google
            },
            bcrypt_cost: env_parse("BCRYPT_COST", defaults.bcrypt_cost),
            default_role: std::env::var("DEFAULT_USER_ROLE").unwrap_or(defaults.default_role),
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_google_timeout() -> u64 {
    10
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_role() -> String {
    String::from("end_user")
}
