//! MySQL implementation of the OtpAttemptRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use sr_core::domain::entities::otp_attempt::{NewOtpAttempt, OtpAttempt};
use sr_core::errors::DomainError;
use sr_core::repositories::OtpAttemptRepository;

use super::{column, query_failed};

/// Append-only attempt log backed by the `otp_attempts` table
pub struct MySqlOtpAttemptRepository {
    pool: MySqlPool,
}

impl MySqlOtpAttemptRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_attempt(row: &MySqlRow) -> Result<OtpAttempt, DomainError> {
        Ok(OtpAttempt {
            id: column(row, "id")?,
            otp_id: column(row, "otp_id")?,
            submitted_value: column(row, "submitted_value")?,
            success: column(row, "success")?,
            created_at: column(row, "created_at")?,
        })
    }
}

#[async_trait]
impl OtpAttemptRepository for MySqlOtpAttemptRepository {
    async fn record(&self, attempt: NewOtpAttempt) -> Result<OtpAttempt, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO otp_attempts (otp_id, submitted_value, success, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(attempt.otp_id)
        .bind(&attempt.submitted_value)
        .bind(attempt.success)
        .bind(attempt.created_at)
        .execute(&self.pool)
        .await
        .map_err(query_failed("record OTP attempt"))?;

        Ok(attempt.into_attempt(result.last_insert_id() as i64))
    }

    async fn find_by_otp_id(&self, otp_id: i64) -> Result<Vec<OtpAttempt>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, otp_id, submitted_value, success, created_at
            FROM otp_attempts
            WHERE otp_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(otp_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("list OTP attempts"))?;

        rows.iter().map(Self::row_to_attempt).collect()
    }
}
