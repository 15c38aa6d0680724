//! Database pool setup and the connectivity probe behind `/health`.

use anyhow::{Context, Result, ensure};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::time::Duration;

use crate::config::AppConfig;

const CONNECT_ATTEMPTS: u32 = 5;
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Opens the connection pool described by the configuration.
///
/// Pool sizing and the acquire timeout come from `AppConfig`; idle and
/// lifetime caps are fixed. Transient connection failures are retried
/// with exponential backoff before giving up.
pub async fn init_pool(config: &AppConfig) -> Result<DatabaseConnection> {
    ensure!(
        !config.database_url.is_empty(),
        "database url must not be empty"
    );

    let mut options = ConnectOptions::new(&config.database_url);
    options
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_millis(config.db_acquire_timeout_ms))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let mut delay = INITIAL_RETRY_DELAY;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match Database::connect(options.clone()).await {
            Ok(db) => {
                tracing::info!(attempt, "database pool ready");
                return Ok(db);
            }
            Err(err) if attempt < CONNECT_ATTEMPTS => {
                tracing::warn!(attempt, %err, retry_in = ?delay, "database connection failed");
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("could not open database pool after {attempt} attempts")
                });
            }
        }
    }
}

/// Verifies the pool can still reach the database.
pub async fn health_check(db: &DatabaseConnection) -> Result<()> {
    let statement = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    db.query_one(statement)
        .await
        .context("database ping failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_database_url_is_rejected() {
        let config = AppConfig {
            database_url: String::new(),
            ..AppConfig::default()
        };

        assert!(init_pool(&config).await.is_err());
    }
}
