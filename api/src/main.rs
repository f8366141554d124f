use actix_web::{web, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};

use pr_api::telemetry::init_tracing;
use pr_api::{create_app, AppState};
use pr_core::repositories::{RefreshTokenRepository, UserRepository, VerificationCodeRepository};
use pr_core::services::auth::{AuthService, AuthServiceConfig};
use pr_core::services::verification::EmailServiceTrait;
use pr_infra::database::{
    DatabasePool, MySqlRefreshTokenRepository, MySqlUserRepository,
    MySqlVerificationCodeRepository,
};
use pr_infra::email::EmailSender;
use pr_infra::memory::{
    InMemoryRefreshTokenRepository, InMemoryUserRepository, InMemoryVerificationCodeRepository,
};
use pr_shared::config::{AppConfig, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting ProductReview identity server");

    config.ensure_production_ready()?;
    for fallback in config.development_fallbacks() {
        warn!(fallback, "Running with a development fallback");
    }

    let mailer = Arc::new(EmailSender::from_config(&config.email)?);
    let auth_config = AuthServiceConfig::from(&config.auth);

    match &config.database {
        Some(database) => {
            let pool = DatabasePool::new(database).await?;
            pool.run_migrations().await?;
            info!(stats = %pool.get_statistics(), "Using MySQL stores");

            let service = AuthService::build(
                Arc::new(MySqlUserRepository::new(pool.get_pool().clone())),
                Arc::new(MySqlVerificationCodeRepository::new(pool.get_pool().clone())),
                Arc::new(MySqlRefreshTokenRepository::new(pool.get_pool().clone())),
                mailer,
                auth_config,
            );
            let result = serve(&config.server, service).await;
            pool.close().await;
            result?;
        }
        None => {
            warn!("DATABASE_URL is not set; using in-memory stores, nothing will persist");

            let service = AuthService::build(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryVerificationCodeRepository::new()),
                Arc::new(InMemoryRefreshTokenRepository::new()),
                mailer,
                auth_config,
            );
            serve(&config.server, service).await?;
        }
    }

    info!("Server stopped");
    Ok(())
}

async fn serve<U, V, R, E>(
    server: &ServerConfig,
    service: AuthService<U, V, R, E>,
) -> std::io::Result<()>
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    R: RefreshTokenRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let state = web::Data::new(AppState::new(Arc::new(service)));
    let bind_address = server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut http = HttpServer::new(move || create_app(state.clone()));
    if server.workers > 0 {
        http = http.workers(server.workers);
    }

    http.bind(&bind_address)?.run().await
}
