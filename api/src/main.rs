use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use sr_api::configure_app;
use sr_api::middleware::{create_cors, SecurityMiddleware};
use sr_api::routes::{AppState, HealthState};
use sr_api::telemetry::init_tracing;
use sr_core::services::{
    AuthService, AuthServiceConfig, OtpService, OtpServiceConfig, TokenService, TokenServiceConfig,
};
use sr_infra::database::{DatabasePool, MySqlOtpAttemptRepository, MySqlOtpRepository, MySqlUserRepository};
use sr_infra::email::{create_email_service, EmailServiceAdapter};
use sr_infra::oauth::GoogleIdentityProvider;
use sr_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(
        event = "server_starting",
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Smart Restaurant API server"
    );

    if config.environment.is_production() {
        for warning in config.production_warnings() {
            tracing::warn!(event = "insecure_configuration", "{}", warning);
        }
    }

    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.run_migrations {
        pool.run_migrations().await.context("failed to run database migrations")?;
    }
    tracing::info!(event = "database_ready", stats = %pool.get_statistics());

    let mysql = pool.get_pool().clone();
    let otp_service = Arc::new(OtpService::new(
        Arc::new(MySqlOtpRepository::new(mysql.clone())),
        Arc::new(MySqlOtpAttemptRepository::new(mysql.clone())),
        OtpServiceConfig::from(&config.auth.otp),
    ));
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));

    let email_service = EmailServiceAdapter::new(
        create_email_service(&config.mail),
        config.auth.otp.code_expiration_minutes,
    );
    tracing::info!(event = "email_provider_selected", provider = email_service.provider_name());

    let identity_provider =
        GoogleIdentityProvider::new(&config.auth.google).context("failed to build Google identity client")?;

    let auth_service = Arc::new(AuthService::new(
        Arc::new(MySqlUserRepository::new(mysql)),
        otp_service,
        token_service,
        Arc::new(email_service),
        Arc::new(identity_provider),
        AuthServiceConfig::from(&config.auth),
    ));

    let app_state = web::Data::new(AppState::new(auth_service));
    let health_state = web::Data::new(HealthState::new(Some(pool.clone())));

    let bind_address = config.server.bind_address();
    tracing::info!(event = "server_binding", address = %bind_address);

    let server_config = config.server.clone();
    let cors_config = config.cors.clone();
    let environment = config.environment;

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityMiddleware::for_environment(environment))
            .wrap(create_cors(&cors_config))
            .wrap(TracingLogger::default())
            .configure(configure_app(
                app_state.clone(),
                health_state.clone(),
                server_config.max_payload_size,
            ))
    })
    .workers(config.server.workers)
    .keep_alive(Duration::from_secs(config.server.keep_alive))
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {bind_address}"))?
    .run()
    .await?;

    pool.close().await;
    tracing::info!(event = "server_stopped");
    Ok(())
}
