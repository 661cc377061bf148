use std::sync::Arc;

use anyhow::Context;
use portfolio_server::application::auth_service::AuthService;
use portfolio_server::application::config_service::ConfigService;
use portfolio_server::application::post_service::PostService;
use portfolio_server::data::config_repository::PostgresSiteConfigRepository;
use portfolio_server::data::memory::{InMemoryPostRepository, InMemorySiteConfigRepository};
use portfolio_server::data::post_repository::PostgresPostRepository;
use portfolio_server::domain::admin::AdminCredentials;
use portfolio_server::infrastructure::config::{AppConfig, StorageBackend};
use portfolio_server::infrastructure::database::{create_pool, run_migrations};
use portfolio_server::infrastructure::logging::init_logging;
use portfolio_server::infrastructure::security::JwtKeys;
use portfolio_server::server;
use tracing::warn;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let auth_service = AuthService::new(
        AdminCredentials::new(
            config.admin_email.clone(),
            config.admin_password_hash.clone(),
        ),
        JwtKeys::new(config.jwt_secret.clone(), config.jwt_ttl_hours),
    );

    match config.storage {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .clone()
                .context("DATABASE_URL must be set")?;
            let pool = create_pool(&database_url)
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("failed to run migrations")?;

            let post_service = PostService::new(Arc::new(PostgresPostRepository::new(pool.clone())));
            let config_service = ConfigService::new(Arc::new(PostgresSiteConfigRepository::new(pool)));
            server::run(config, post_service, config_service, auth_service).await
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage, content is lost on restart");
            let post_service = PostService::new(Arc::new(InMemoryPostRepository::new()));
            let config_service = ConfigService::new(Arc::new(InMemorySiteConfigRepository::new()));
            server::run(config, post_service, config_service, auth_service).await
        }
    }
}
