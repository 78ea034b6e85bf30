//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Email delivery backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    SendGrid,
    /// Logs messages instead of sending them
    #[default]
    Mock,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sendgrid" => Ok(MailProvider::SendGrid),
            "mock" => Ok(MailProvider::Mock),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// Email provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub provider: MailProvider,

    /// Provider API key
    #[serde(default)]
    pub api_key: String,

    /// Sender address
    pub from_email: String,

    /// Sender display name
    pub from_name: String,

    /// Provider API base URL
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Mock,
            api_key: String::new(),
            from_email: String::from("no-reply@smartrestaurant.local"),
            from_name: String::from("Smart Restaurant"),
            api_base_url: String::from("https://api.sendgrid.com"),
            timeout_secs: default_timeout(),
        }
    }
}

impl MailConfig {
    /// Create from `MAIL_PROVIDER`, `SENDGRID_API_KEY`, `MAIL_FROM_EMAIL`, `MAIL_FROM_NAME`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("MAIL_PROVIDER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.provider),
            api_key: std::env::var("SENDGRID_API_KEY").unwrap_or_default(),
            from_email: std::env::var("MAIL_FROM_EMAIL").unwrap_or(defaults.from_email),
            from_name: std::env::var("MAIL_FROM_NAME").unwrap_or(defaults.from_name),
            api_base_url: std::env::var("SENDGRID_API_BASE_URL").unwrap_or(defaults.api_base_url),
            ..defaults
        }
    }

    pub fn is_mock(&self) -> bool {
        self.provider == MailProvider::Mock
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_provider_from_str() {
        assert_eq!("SendGrid".parse::<MailProvider>().unwrap(), MailProvider::SendGrid);
        assert_eq!("mock".parse::<MailProvider>().unwrap(), MailProvider::Mock);
        assert!("smtp".parse::<MailProvider>().is_err());
    }

    #[test]
    fn test_mail_config_default() {
        let config = MailConfig::default();
        assert!(config.is_mock());
        assert_eq!(config.from_name, "Smart Restaurant");
    }
}
