use anyhow::Result;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

use crate::config::{env_bool, env_opt};

// Transport crates log their own export traffic; keep it out of the exporter.
const OTEL_FILTER: &str = "info,hyper=off,opentelemetry=off,tonic=off,h2=off,reqwest=off";

/// Where and how loudly a binary logs.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub component: &'static str,
    pub dev_mode: bool,
    /// Daily rotating JSON files are written here when set.
    pub file_dir: Option<String>,
}

impl LogSettings {
    /// Reads `DEV_MODE`, `ENABLE_FILE_LOG` and `LOG_DIR`.
    pub fn from_env(component: &'static str) -> Result<Self> {
        let dev_mode = env_bool("DEV_MODE", false)?;
        let file_dir = env_bool("ENABLE_FILE_LOG", false)?.then(|| {
            env_opt("LOG_DIR").unwrap_or_else(|| {
                if dev_mode { "./logs" } else { "/var/log/medsupply" }.to_string()
            })
        });

        Ok(Self {
            component,
            dev_mode,
            file_dir,
        })
    }
}

/// Installs console, file and OTLP layers. Keep the returned guard alive
/// until exit or buffered file lines are lost.
pub fn init_logger(
    logger_provider: &SdkLoggerProvider,
    settings: &LogSettings,
) -> Option<WorkerGuard> {
    let (file_layer, guard) = match &settings.file_dir {
        Some(dir) => {
            let appender = RollingFileAppender::new(
                Rotation::DAILY,
                dir,
                format!("medsupply_{}.log", settings.component),
            );
            let (writer, guard) = non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new("info"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_default = if settings.dev_mode { "info" } else { "off" };
    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_default)),
        );

    let otel_layer = OpenTelemetryTracingBridge::new(logger_provider)
        .with_filter(EnvFilter::new(OTEL_FILTER));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .init();

    guard
}
