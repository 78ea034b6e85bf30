//! HTTP route handlers

pub mod auth;
pub mod health;

pub use auth::AppState;
pub use health::HealthState;
