//! Registration Service
//!
//! Accepts user sign-ups over HTTP, hashes passwords with Argon2id and
//! persists users in memory or PostgreSQL, rejecting duplicate emails.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::state::{AppState, UserServiceTrait};
use config::StorageBackend;
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService,
};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::with_cost(config.hashing.cost())?);
    let email_matching = config.registration.email_matching;

    info!(
        "Storage backend: {:?}, email matching: {:?}",
        config.storage.backend, email_matching
    );

    let user_service: Arc<dyn UserServiceTrait> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(
            UserService::new(Arc::new(InMemoryUserRepository::new()), hasher)
                .with_email_matching(email_matching),
        ),
        StorageBackend::Postgres => {
            let repository = connect_postgres(config).await?;

            Arc::new(
                UserService::new(Arc::new(repository), hasher)
                    .with_email_matching(email_matching),
            )
        }
    };

    Ok(AppState::new(user_service))
}

async fn connect_postgres(config: &AppConfig) -> anyhow::Result<PostgresUserRepository> {
    let database_url = config.database.resolve_url().ok_or_else(|| {
        anyhow::anyhow!("database.url or DATABASE_URL is required for the postgres backend")
    })?;

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.storage.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
    info!("PostgreSQL connection established");

    let repository = PostgresUserRepository::new(pool);
    repository.ensure_schema().await?;

    Ok(repository)
}
