//! Database connection pooling utilities

use crate::config::DatabaseConfig;
use crate::error::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Type alias for the database pool
pub type DbPool = PgPool;

/// Create a new database connection pool
///
/// # Errors
///
/// Returns an error if the pool cannot be created or if the connection fails
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.connection_url())
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Run embedded database migrations
///
/// Migrations live in `crates/shared/migrations` and are compiled into the
/// binary. Already-applied migrations are skipped.
///
/// # Errors
///
/// Returns an error if a migration fails or the recorded checksums diverge
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Check database connection health
///
/// # Errors
///
/// Returns an error if the connection check fails
pub async fn check_health(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn database_config() -> DatabaseConfig {
        let mut config = Config::from_lookup(|_| None)
            .expect("Default configuration must load")
            .database;
        config.url = std::env::var("DATABASE_URL").ok();
        config.min_connections = 0;
        config
    }

    #[tokio::test]
    #[ignore] // Requires DATABASE_URL (integration test)
    async fn test_pool_migrations_and_health() {
        let pool = create_pool(&database_config()).await.unwrap();

        run_migrations(&pool).await.unwrap();
        // Already-applied migrations are skipped
        run_migrations(&pool).await.unwrap();

        assert!(check_health(&pool).await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_database_fails() {
        let mut config = database_config();
        config.url = Some("postgres://rocket@127.0.0.1:1/rocket_api".to_string());
        config.acquire_timeout_secs = 1;

        assert!(create_pool(&config).await.is_err());
    }
}
