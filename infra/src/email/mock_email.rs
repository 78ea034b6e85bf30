//! Mock Email Service Implementation
//!
//! Logs messages instead of sending them. Used for local development and
//! whenever no provider credentials are configured.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use sr_shared::utils::validation::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Mock email service for development and testing
#[derive(Clone, Default)]
pub struct MockEmailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Every accepted message, oldest first
    outbox: Arc<Mutex<Vec<EmailMessage>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service that rejects every message
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Copy of the accepted messages
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let masked = mask_email(&message.to);

        if self.simulate_failure {
            tracing::warn!(
                provider = "mock",
                email = %masked,
                "Mock email service simulating failure"
            );
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push(message.clone());
        }

        tracing::info!(
            provider = "mock",
            email = %masked,
            subject = %message.subject,
            message_id = %message_id,
            count,
            "Mock email accepted"
        );
        tracing::debug!(provider = "mock", body = %message.text_body, "Mock email body");

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
