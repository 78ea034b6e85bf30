//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and health checks
//! - Embedded migrations
//! - Repository implementations for the core persistence traits

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlOtpAttemptRepository, MySqlOtpRepository, MySqlUserRepository};
