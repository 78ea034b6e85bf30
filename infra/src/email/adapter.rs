//! Adapter implementing the core EmailServiceTrait for any provider

use async_trait::async_trait;

use sr_core::domain::entities::otp::OtpPurpose;
use sr_core::services::auth::EmailServiceTrait;

use super::email_service::EmailService;

/// Wraps a provider and the code lifetime quoted in the message body
pub struct EmailServiceAdapter {
    inner: Box<dyn EmailService>,
    expires_in_minutes: i64,
}

impl EmailServiceAdapter {
    pub fn new(inner: Box<dyn EmailService>, expires_in_minutes: i64) -> Self {
        Self {
            inner,
            expires_in_minutes,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl EmailServiceTrait for EmailServiceAdapter {
    async fn send_otp_email(&self, to_email: &str, code: &str, purpose: OtpPurpose) -> Result<String, String> {
        self.inner
            .send_otp_code(to_email, code, purpose, self.expires_in_minutes)
            .await
            .map_err(|e| e.to_string())
    }
}
