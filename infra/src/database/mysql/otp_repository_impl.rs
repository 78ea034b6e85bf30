//! MySQL implementation of the OtpRepository trait.
//!
//! Issuance locks the pending rows for the pair with `SELECT ... FOR UPDATE`
//! and supersedes them in the same transaction as the insert. Verification
//! and token redemption are single conditional `UPDATE`s; the caller learns
//! whether it won from the affected row count.
//!
//! "Latest" is the highest AUTO_INCREMENT id. Ids are handed out while the
//! issuing transaction holds the pair's row locks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use sr_core::domain::entities::otp::{NewOtpRecord, OtpPurpose, OtpRecord};
use sr_core::errors::DomainError;
use sr_core::repositories::OtpRepository;

use super::{column, query_failed};

const SELECT_COLUMNS: &str = r#"
    SELECT id, target, purpose, code, expires_at, is_verified,
           verify_token, token_consumed_at, created_at
    FROM otps
"#;

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    /// Create a new MySQL OTP repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to OtpRecord entity
    fn row_to_record(row: &MySqlRow) -> Result<OtpRecord, DomainError> {
        let purpose: String = column(row, "purpose")?;

        Ok(OtpRecord {
            id: column(row, "id")?,
            target: column(row, "target")?,
            purpose: purpose.parse().map_err(|e| DomainError::Internal {
                message: format!("Invalid OTP purpose in store: {}", e),
            })?,
            code: column(row, "code")?,
            expires_at: column(row, "expires_at")?,
            is_verified: column(row, "is_verified")?,
            verify_token: column(row, "verify_token")?,
            token_consumed_at: column(row, "token_consumed_at")?,
            created_at: column(row, "created_at")?,
        })
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        target: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let query = format!(
            "{} WHERE target = ? AND purpose = ? {} ORDER BY id DESC LIMIT 1",
            SELECT_COLUMNS, condition
        );

        let row = sqlx::query(&query)
            .bind(target)
            .bind(purpose.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("find OTP record"))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn issue(&self, record: NewOtpRecord) -> Result<OtpRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(query_failed("begin OTP issue transaction"))?;

        // Row locks serialize concurrent issuers for the same pair
        sqlx::query(
            "SELECT id FROM otps WHERE target = ? AND purpose = ? AND is_verified = FALSE FOR UPDATE",
        )
        .bind(&record.target)
        .bind(record.purpose.as_str())
        .fetch_all(&mut *tx)
        .await
        .map_err(query_failed("lock pending OTP records"))?;

        sqlx::query(
            r#"
            UPDATE otps
            SET is_verified = TRUE, updated_at = ?
            WHERE target = ? AND purpose = ? AND is_verified = FALSE
            "#,
        )
        .bind(record.created_at)
        .bind(&record.target)
        .bind(record.purpose.as_str())
        .execute(&mut *tx)
        .await
        .map_err(query_failed("supersede pending OTP records"))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO otps (target, purpose, code, expires_at, is_verified, created_at, updated_at)
            VALUES (?, ?, ?, ?, FALSE, ?, ?)
            "#,
        )
        .bind(&record.target)
        .bind(record.purpose.as_str())
        .bind(&record.code)
        .bind(record.expires_at)
        .bind(record.created_at)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await
        .map_err(query_failed("insert OTP record"))?;

        tx.commit()
            .await
            .map_err(query_failed("commit OTP issue transaction"))?;

        Ok(record.into_record(inserted.last_insert_id() as i64))
    }

    async fn find_latest_pending(
        &self,
        target: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError> {
        self.fetch_one_where("AND is_verified = FALSE", target, purpose).await
    }

    async fn find_latest(
        &self,
        target: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError> {
        self.fetch_one_where("", target, purpose).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<OtpRecord>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("find OTP record by id"))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn find_all(&self, target: &str, purpose: OtpPurpose) -> Result<Vec<OtpRecord>, DomainError> {
        let query = format!(
            "{} WHERE target = ? AND purpose = ? ORDER BY id DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(target)
            .bind(purpose.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("list OTP records"))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn mark_verified(&self, id: i64, verify_token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE otps
            SET is_verified = TRUE, verify_token = ?, updated_at = ?
            WHERE id = ? AND is_verified = FALSE
            "#,
        )
        .bind(verify_token)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(query_failed("mark OTP record verified"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn consume_verify_token(&self, id: i64, consumed_at: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE otps
            SET token_consumed_at = ?, updated_at = ?
            WHERE id = ? AND verify_token IS NOT NULL AND token_consumed_at IS NULL
            "#,
        )
        .bind(consumed_at)
        .bind(consumed_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(query_failed("redeem verify token"))?;

        Ok(result.rows_affected() == 1)
    }
}
