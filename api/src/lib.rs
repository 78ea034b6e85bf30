//! HTTP API for the Smart Restaurant account service

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::configure_app;
