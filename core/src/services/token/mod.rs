//! Session token service module for JWT management

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
