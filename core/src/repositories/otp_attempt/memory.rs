//! In-memory implementation of OtpAttemptRepository

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp_attempt::{NewOtpAttempt, OtpAttempt};
use crate::errors::DomainError;

use super::trait_::OtpAttemptRepository;

#[derive(Clone, Default)]
pub struct InMemoryOtpAttemptRepository {
    attempts: Arc<RwLock<Vec<OtpAttempt>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryOtpAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `record` fail as if the store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Every stored attempt, in insertion order
    pub async fn all(&self) -> Vec<OtpAttempt> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl OtpAttemptRepository for InMemoryOtpAttemptRepository {
    async fn record(&self, attempt: NewOtpAttempt) -> Result<OtpAttempt, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "OTP attempt store unavailable".to_string(),
            });
        }
        let mut attempts = self.attempts.write().await;
        let stored = attempt.into_attempt(attempts.len() as i64 + 1);
        attempts.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_otp_id(&self, otp_id: i64) -> Result<Vec<OtpAttempt>, DomainError> {
        let attempts = self.attempts.read().await;
        Ok(attempts.iter().filter(|a| a.otp_id == otp_id).cloned().collect())
    }
}
