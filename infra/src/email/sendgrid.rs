//! SendGrid Email Service Implementation
//!
//! Sends mail through the SendGrid v3 `mail/send` endpoint. SendGrid answers
//! `202 Accepted` with an empty body and reports the message id in the
//! `X-Message-Id` header.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use sr_shared::config::MailConfig;
use sr_shared::utils::validation::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

const MESSAGE_ID_HEADER: &str = "X-Message-Id";
const RECIPIENT_NAME: &str = "Recipient";

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

/// Request body for `POST /v3/mail/send`
#[derive(Debug, Serialize)]
struct SendMailRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

/// SendGrid email service implementation
pub struct SendGridEmailService {
    client: Client,
    api_key: String,
    from_email: String,
    from_name: String,
    endpoint: String,
}

impl SendGridEmailService {
    /// Create a new SendGrid email service
    ///
    /// Fails when no API key is configured.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "SENDGRID_API_KEY is not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        tracing::info!(
            from = %mask_email(&config.from_email),
            "SendGrid email service initialized"
        );

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
            endpoint: format!("{}/v3/mail/send", config.api_base_url.trim_end_matches('/')),
        })
    }

    fn request_body<'a>(&'a self, message: &'a EmailMessage) -> SendMailRequest<'a> {
        SendMailRequest {
            personalizations: [Personalization {
                to: [Address {
                    email: &message.to,
                    name: RECIPIENT_NAME,
                }],
            }],
            from: Address {
                email: &self.from_email,
                name: &self.from_name,
            },
            subject: &message.subject,
            content: [
                Content {
                    kind: "text/plain",
                    value: &message.text_body,
                },
                Content {
                    kind: "text/html",
                    value: &message.html_body,
                },
            ],
        }
    }
}

#[async_trait]
impl EmailService for SendGridEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let masked = mask_email(&message.to);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(message))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = "sendgrid", email = %masked, error = %e, "SendGrid request failed");
                InfrastructureError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                provider = "sendgrid",
                email = %masked,
                status = status.as_u16(),
                body = %body,
                "SendGrid rejected message"
            );
            return Err(InfrastructureError::Email(format!(
                "SendGrid returned {}: {}",
                status, body
            )));
        }

        let message_id = response
            .headers()
            .get(MESSAGE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| format!("sendgrid_{}", Uuid::new_v4()));

        tracing::info!(
            provider = "sendgrid",
            email = %masked,
            status = status.as_u16(),
            message_id = %message_id,
            "Email accepted by SendGrid"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "SendGrid"
    }
}
