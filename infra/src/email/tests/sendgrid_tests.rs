//! SendGrid client tests against a local mock server

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sr_core::domain::entities::otp::OtpPurpose;
use sr_shared::config::{MailConfig, MailProvider};

use crate::email::{EmailService, SendGridEmailService};
use crate::InfrastructureError;

fn config(base_url: &str) -> MailConfig {
    MailConfig {
        provider: MailProvider::SendGrid,
        api_key: "SG.test-key".to_string(),
        from_email: "noreply@restaurant.test".to_string(),
        from_name: "Smart Restaurant".to_string(),
        api_base_url: base_url.to_string(),
        timeout_secs: 5,
    }
}

#[test]
fn test_new_requires_api_key() {
    let mut config = config("http://localhost");
    config.api_key = "   ".to_string();

    assert!(matches!(
        SendGridEmailService::new(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[tokio::test]
async fn test_send_returns_message_id_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .and(header("Authorization", "Bearer SG.test-key"))
        .and(body_partial_json(json!({
            "personalizations": [{"to": [{"email": "guest@x.com", "name": "Recipient"}]}],
            "from": {"email": "noreply@restaurant.test", "name": "Smart Restaurant"},
            "subject": "Your OTP Code"
        })))
        .respond_with(ResponseTemplate::new(202).insert_header("X-Message-Id", "sg-message-1"))
        .expect(1)
        .mount(&server)
        .await;

    let service = SendGridEmailService::new(&config(&server.uri())).unwrap();
    let message_id = service
        .send_otp_code("guest@x.com", "123456", OtpPurpose::VerifyEmail, 5)
        .await
        .unwrap();

    assert_eq!(message_id, "sg-message-1");
}

#[tokio::test]
async fn test_send_reports_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"message": "The provided authorization grant is invalid"}]
        })))
        .mount(&server)
        .await;

    let service = SendGridEmailService::new(&config(&server.uri())).unwrap();
    let result = service
        .send_otp_code("guest@x.com", "123456", OtpPurpose::ResetPassword, 5)
        .await;

    match result {
        Err(InfrastructureError::Email(message)) => {
            assert!(message.contains("401"));
            assert!(message.contains("authorization grant"));
        }
        other => panic!("expected email error, got {:?}", other),
    }
}
