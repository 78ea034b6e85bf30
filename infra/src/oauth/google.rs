//! Google ID token verification through the `tokeninfo` endpoint
//!
//! Google validates the signature and expiry; any non-200 answer means the
//! token is not acceptable.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

use sr_core::services::auth::{IdentityProviderTrait, VerifiedIdentity};
use sr_shared::config::GoogleAuthConfig;
use sr_shared::utils::validation::mask_email;

use crate::InfrastructureError;

/// Claims returned by `tokeninfo` that sign-in relies on
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokenInfo {
    pub email: String,

    /// Google encodes this as the string "true" or "false"
    #[serde(default, deserialize_with = "flexible_bool")]
    pub email_verified: Option<bool>,

    #[serde(default)]
    pub given_name: Option<String>,

    #[serde(default)]
    pub family_name: Option<String>,
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => Some(value),
        Some(Flag::Text(text)) => Some(text.eq_ignore_ascii_case("true")),
        None => None,
    })
}

/// Verifies Google ID tokens
pub struct GoogleIdentityProvider {
    client: Client,
    tokeninfo_url: String,
}

impl GoogleIdentityProvider {
    pub fn new(config: &GoogleAuthConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            tokeninfo_url: config.tokeninfo_url.clone(),
        })
    }

    /// Ask Google to validate `id_token` and decode its claims
    pub async fn token_info(&self, id_token: &str) -> Result<GoogleTokenInfo, InfrastructureError> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(InfrastructureError::Identity(format!(
                "tokeninfo returned {}",
                status
            )));
        }

        let info: GoogleTokenInfo = response.json().await?;

        if info.email_verified == Some(false) {
            return Err(InfrastructureError::Identity(
                "Google account email is not verified".to_string(),
            ));
        }

        Ok(info)
    }
}

#[async_trait]
impl IdentityProviderTrait for GoogleIdentityProvider {
    async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedIdentity, String> {
        let info = self.token_info(id_token).await.map_err(|e| {
            tracing::warn!(provider = "google", error = %e, "Google ID token verification failed");
            e.to_string()
        })?;

        tracing::debug!(provider = "google", email = %mask_email(&info.email), "Google ID token verified");

        Ok(VerifiedIdentity {
            email: info.email,
            given_name: info.given_name,
            family_name: info.family_name,
        })
    }
}
