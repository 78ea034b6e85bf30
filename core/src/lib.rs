//! # Smart Restaurant Core
//!
//! Domain layer for the Smart Restaurant backend: entities, the OTP
//! verification workflow, account services, repository interfaces and
//! error types. Storage and delivery are supplied by the infrastructure
//! crate through the traits defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
