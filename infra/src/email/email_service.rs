//! Email service interface and message rendering

use async_trait::async_trait;

use sr_core::domain::entities::otp::OtpPurpose;

use crate::InfrastructureError;

/// A rendered email ready for a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

impl EmailMessage {
    pub const OTP_SUBJECT: &'static str = "Your OTP Code";

    /// Render the OTP email for `purpose`
    pub fn otp(to: &str, code: &str, purpose: OtpPurpose, expires_in_minutes: i64) -> Self {
        let action = match purpose {
            OtpPurpose::VerifyEmail => "verify email",
            OtpPurpose::ResetPassword => "reset password",
        };

        Self {
            to: to.to_string(),
            subject: Self::OTP_SUBJECT.to_string(),
            text_body: format!(
                "Your OTP to {} is: {} (expires in {} minutes)",
                action, code, expires_in_minutes
            ),
            html_body: format!(
                "<strong>Your OTP Code:</strong> <h2>{}</h2><p>This code expires in {} minutes</p>",
                code, expires_in_minutes
            ),
        }
    }
}

/// Email provider interface
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a message
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the accepted message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Render and send an OTP email
    async fn send_otp_code(
        &self,
        to: &str,
        code: &str,
        purpose: OtpPurpose,
        expires_in_minutes: i64,
    ) -> Result<String, InfrastructureError> {
        let message = EmailMessage::otp(to, code, purpose, expires_in_minutes);
        self.send_email(&message).await
    }

    /// Name of the provider ("SendGrid", "Mock")
    fn provider_name(&self) -> &str;
}
