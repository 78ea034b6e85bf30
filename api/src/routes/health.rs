//! Liveness and dependency health

use actix_web::{web, HttpResponse};
use sr_infra::database::DatabasePool;
use sr_shared::types::{HealthResponse, HealthStatus};

/// State for `GET /health`
#[derive(Clone)]
pub struct HealthState {
    /// Absent when the server runs without a database
    pub database: Option<DatabasePool>,
    pub version: String,
}

impl HealthState {
    pub fn new(database: Option<DatabasePool>) -> Self {
        Self {
            database,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Handler for GET /health
///
/// 200 while every dependency answers, 503 otherwise.
pub async fn health_check(state: web::Data<HealthState>) -> HttpResponse {
    let mut response = HealthResponse::new(state.version.clone());

    if let Some(pool) = &state.database {
        let status = match pool.health_check().await {
            Ok(true) => HealthStatus::Healthy,
            Ok(false) => HealthStatus::Unhealthy,
            Err(e) => {
                tracing::warn!(event = "health_check_failed", dependency = "database", error = %e);
                HealthStatus::Unhealthy
            }
        };
        response = response.with_service("database", status);
    }

    if response.status == HealthStatus::Healthy {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
