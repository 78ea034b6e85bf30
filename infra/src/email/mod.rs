//! Email delivery
//!
//! - [`EmailService`]: provider interface used inside this crate
//! - [`SendGridEmailService`]: SendGrid v3 `mail/send`
//! - [`MockEmailService`]: logs messages for development
//! - [`EmailServiceAdapter`]: bridges a provider to the core `EmailServiceTrait`

pub mod email_service;
pub mod mock_email;
pub mod sendgrid;
mod adapter;

pub use adapter::EmailServiceAdapter;
pub use email_service::{EmailMessage, EmailService};
pub use mock_email::MockEmailService;
pub use sendgrid::SendGridEmailService;

use sr_shared::config::{MailConfig, MailProvider};

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// A SendGrid configuration without an API key falls back to the mock
/// provider so local development works without credentials.
pub fn create_email_service(config: &MailConfig) -> Box<dyn EmailService> {
    match config.provider {
        MailProvider::Mock => Box::new(MockEmailService::new()),
        MailProvider::SendGrid => match SendGridEmailService::new(config) {
            Ok(service) => Box::new(service),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize SendGrid email service");
                tracing::warn!("Falling back to mock email service");
                Box::new(MockEmailService::new())
            }
        },
    }
}
