//! # Innkeep API Main Entry Point

use innkeep::{config::ConfigLoader, db::init_pool, logging, server::run_server};
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from layered env files and variables
    let config = ConfigLoader::new().load()?;

    logging::init_subscriber(&config);
    tracing::info!(profile = %config.profile, "loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "effective configuration");
    }

    let db = init_pool(&config).await?;

    if config.run_migrations {
        Migrator::up(&db, None).await?;
        tracing::info!("migrations applied");
    }

    run_server(config, db).await
}
