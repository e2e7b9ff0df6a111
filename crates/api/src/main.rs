use anyhow::{Context, Result};
use api::handler::AppRouter;
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager},
    state::AppState,
    utils::{LogSettings, Telemetry, init_logger},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let log_settings = LogSettings::from_env("api")?;
    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::init("medsupply-api", &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;

    let _log_guard = init_logger(&telemetry.logger_provider(), &log_settings);

    let pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to connect to database")?;

    if config.run_migrations {
        ConnectionManager::run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", config.upload_dir))?;

    let state = AppState::new(pool, &config)
        .await
        .context("Failed to create AppState")?;

    info!("🚀 Server started successfully");

    AppRouter::serve(config.port, state, &config.upload_dir)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    telemetry.shutdown()?;

    Ok(())
}
