//! Unit tests for email service creation and the core adapter

use sr_core::domain::entities::otp::OtpPurpose;
use sr_core::services::auth::EmailServiceTrait;
use sr_shared::config::{MailConfig, MailProvider};

use crate::email::{create_email_service, EmailMessage, EmailServiceAdapter, MockEmailService};

#[test]
fn test_create_mock_service() {
    let service = create_email_service(&MailConfig::default());
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_sendgrid_without_key_falls_back_to_mock() {
    let config = MailConfig {
        provider: MailProvider::SendGrid,
        api_key: String::new(),
        ..MailConfig::default()
    };

    let service = create_email_service(&config);
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_create_sendgrid_service() {
    let config = MailConfig {
        provider: MailProvider::SendGrid,
        api_key: "SG.test-key".to_string(),
        ..MailConfig::default()
    };

    let service = create_email_service(&config);
    assert_eq!(service.provider_name(), "SendGrid");
}

#[test]
fn test_otp_message_rendering() {
    let message = EmailMessage::otp("a@x.com", "123456", OtpPurpose::VerifyEmail, 5);

    assert_eq!(message.subject, "Your OTP Code");
    assert_eq!(
        message.text_body,
        "Your OTP to verify email is: 123456 (expires in 5 minutes)"
    );
    assert_eq!(
        message.html_body,
        "<strong>Your OTP Code:</strong> <h2>123456</h2><p>This code expires in 5 minutes</p>"
    );

    let reset = EmailMessage::otp("a@x.com", "654321", OtpPurpose::ResetPassword, 10);
    assert!(reset.text_body.contains("reset password"));
    assert!(reset.html_body.contains("10 minutes"));
}

#[tokio::test]
async fn test_adapter_sends_rendered_code() {
    let mock = MockEmailService::new();
    let adapter = EmailServiceAdapter::new(Box::new(mock.clone()), 5);

    let message_id = adapter
        .send_otp_email("a@x.com", "246810", OtpPurpose::ResetPassword)
        .await
        .unwrap();

    assert!(message_id.starts_with("mock_"));
    let sent = mock.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@x.com");
    assert!(sent[0].text_body.contains("246810"));
}

#[tokio::test]
async fn test_adapter_reports_provider_failure_as_string() {
    let adapter = EmailServiceAdapter::new(Box::new(MockEmailService::failing()), 5);

    let result = adapter
        .send_otp_email("a@x.com", "246810", OtpPurpose::VerifyEmail)
        .await;

    assert!(result.unwrap_err().contains("Simulated"));
}
