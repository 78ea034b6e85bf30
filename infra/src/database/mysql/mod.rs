//! MySQL implementations of the core repository traits

mod otp_attempt_repository_impl;
mod otp_repository_impl;
mod user_repository_impl;

pub use otp_attempt_repository_impl::MySqlOtpAttemptRepository;
pub use otp_repository_impl::MySqlOtpRepository;
pub use user_repository_impl::MySqlUserRepository;

use sqlx::mysql::MySqlRow;
use sqlx::{Decode, MySql, Row, Type};

use sr_core::errors::DomainError;

/// Read one column, reporting the column name on failure
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

/// Wrap a query failure with what was being attempted
pub(crate) fn query_failed(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to {}: {}", action, e),
    }
}
