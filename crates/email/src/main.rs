use anyhow::Context;
use email::app::EmailWorker;
use shared::{
    config::{EmailConfig, env_or},
    utils::{LogSettings, Telemetry, init_logger},
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_settings = LogSettings::from_env("email")?;
    let otel_endpoint = env_or("OTEL_ENDPOINT", "http://otel-collector:4317".to_string())?;

    let config = EmailConfig::init().context("Failed to load email config")?;

    let telemetry = Telemetry::init("medsupply-email", &otel_endpoint)
        .context("Failed to initialize telemetry")?;

    let _log_guard = init_logger(&telemetry.logger_provider(), &log_settings);

    EmailWorker::new(config).run().await?;

    info!("✅ Email worker shutdown gracefully.");
    telemetry.shutdown()?;

    Ok(())
}
