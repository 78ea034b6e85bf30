//! In-memory implementation of OtpRepository
//!
//! All records live behind a single lock, so `issue` and the conditional
//! updates are atomic with respect to each other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp::{NewOtpRecord, OtpPurpose, OtpRecord};
use crate::errors::DomainError;

use super::trait_::OtpRepository;

#[derive(Default)]
struct Store {
    records: Vec<OtpRecord>,
    next_id: i64,
}

/// In-memory OTP store used by tests and local development
#[derive(Clone, Default)]
pub struct InMemoryOtpRepository {
    store: Arc<RwLock<Store>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryOtpRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.store.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "OTP store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

// Ids follow insertion order under the store lock; timestamps are stamped by callers
fn latest<'a>(records: impl Iterator<Item = &'a OtpRecord>) -> Option<&'a OtpRecord> {
    records.max_by_key(|r| r.id)
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn issue(&self, record: NewOtpRecord) -> Result<OtpRecord, DomainError> {
        self.check_available()?;
        let mut store = self.store.write().await;

        for existing in store
            .records
            .iter_mut()
            .filter(|r| r.target == record.target && r.purpose == record.purpose && !r.is_verified)
        {
            existing.is_verified = true;
        }

        store.next_id += 1;
        let created = record.into_record(store.next_id);
        store.records.push(created.clone());
        Ok(created)
    }

    async fn find_latest_pending(
        &self,
        target: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError> {
        self.check_available()?;
        let store = self.store.read().await;
        Ok(latest(
            store
                .records
                .iter()
                .filter(|r| r.target == target && r.purpose == purpose && !r.is_verified),
        )
        .cloned())
    }

    async fn find_latest(
        &self,
        target: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError> {
        self.check_available()?;
        let store = self.store.read().await;
        Ok(latest(
            store
                .records
                .iter()
                .filter(|r| r.target == target && r.purpose == purpose),
        )
        .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<OtpRecord>, DomainError> {
        self.check_available()?;
        let store = self.store.read().await;
        Ok(store.records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_all(&self, target: &str, purpose: OtpPurpose) -> Result<Vec<OtpRecord>, DomainError> {
        self.check_available()?;
        let store = self.store.read().await;
        let mut records: Vec<OtpRecord> = store
            .records
            .iter()
            .filter(|r| r.target == target && r.purpose == purpose)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(records)
    }

    async fn mark_verified(&self, id: i64, verify_token: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut store = self.store.write().await;
        match store.records.iter_mut().find(|r| r.id == id && !r.is_verified) {
            Some(record) => {
                record.is_verified = true;
                record.verify_token = Some(verify_token.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn consume_verify_token(&self, id: i64, consumed_at: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut store = self.store.write().await;
        match store
            .records
            .iter_mut()
            .find(|r| r.id == id && r.token_consumed_at.is_none())
        {
            Some(record) => {
                record.token_consumed_at = Some(consumed_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
