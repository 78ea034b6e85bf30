//! Unit tests for email module

mod create_service_tests;
mod sendgrid_tests;
