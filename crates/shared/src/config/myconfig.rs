use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

use crate::config::RedisConfig;

/// Reads an optional environment variable and parses it, falling back to `default`.
pub fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        _ => Ok(default),
    }
}

pub fn env_bool(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => parse_bool(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
    }
}

pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from: String,
    pub topic: String,
    pub kafka_broker: String,
}

impl EmailConfig {
    pub fn init() -> Result<Self> {
        let smtp_user =
            std::env::var("SMTP_USERNAME").context("Missing environment variable: SMTP_USERNAME")?;
        let smtp_pass =
            std::env::var("SMTP_PASSWORD").context("Missing environment variable: SMTP_PASSWORD")?;
        let smtp_server =
            std::env::var("SMTP_HOST").context("Missing environment variable: SMTP_HOST")?;
        let smtp_port = env_or("SMTP_PORT", 587u16)?;
        let from = env_opt("EMAIL_FROM").unwrap_or_else(|| "no-reply@medsupply.example".into());
        let topic = env_opt("EMAIL_TOPIC").unwrap_or_else(|| "marketplace-email".into());
        let kafka_broker = std::env::var("KAFKA").context("Missing environment variable: KAFKA")?;

        Ok(Self {
            smtp_server,
            smtp_port,
            smtp_user,
            smtp_pass,
            from,
            topic,
            kafka_broker,
        })
    }
}

/// Account shown to doctors who pay by manual bank transfer.
#[derive(Debug, Clone, Default)]
pub struct BankConfig {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub iban: Option<String>,
    pub swift: Option<String>,
    pub instructions: String,
}

impl BankConfig {
    pub fn init() -> Self {
        Self {
            bank_name: env_opt("BANK_NAME").unwrap_or_default(),
            account_name: env_opt("BANK_ACCOUNT_NAME").unwrap_or_default(),
            account_number: env_opt("BANK_ACCOUNT_NUMBER").unwrap_or_default(),
            iban: env_opt("BANK_IBAN"),
            swift: env_opt("BANK_SWIFT"),
            instructions: env_opt("BANK_INSTRUCTIONS").unwrap_or_else(|| {
                "Use your order number as the transfer reference.".to_string()
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl_hours: i64,
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 24,
            cookie_secure: false,
        }
    }
}

/// Opt-in admin credentials, tried after the `admin_users` lookup fails.
#[derive(Clone, Default)]
pub struct AdminFallbackConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AdminFallbackConfig {
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => Some((u.as_str(), p.as_str())),
            _ => None,
        }
    }
}

impl std::fmt::Debug for AdminFallbackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminFallbackConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub run_migrations: bool,
    pub port: u16,
    pub kafka_broker: String,
    pub email_topic: String,
    pub redis: RedisConfig,
    pub session: SessionConfig,
    pub bcrypt_cost: u32,
    pub admin_email: Option<String>,
    pub admin_fallback: AdminFallbackConfig,
    pub public_url: String,
    pub upload_dir: String,
    pub otel_endpoint: String,
    pub bank: BankConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;
        let kafka_broker = std::env::var("KAFKA").context("Missing environment variable: KAFKA")?;

        let run_migrations = parse_bool("RUN_MIGRATIONS", &run_migrations_str)?;

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = env_or("DB_MIN_CONN", 1u32)?;
        let db_max_conn = env_or("DB_MAX_CONN", 10u32)?;

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONN ({db_min_conn}) cannot exceed DB_MAX_CONN ({db_max_conn})"
            ));
        }

        // redis
        let redis = RedisConfig::new(
            env_opt("REDIS_HOST").unwrap_or_else(|| "redis".into()),
            env_or("REDIS_PORT", 6379u16)?,
            env_or("REDIS_DB", 0u8)?,
            env_opt("REDIS_PASSWORD"),
        );

        // session
        let session = SessionConfig {
            ttl_hours: env_or("SESSION_TTL_HOURS", 24i64)?,
            cookie_secure: env_bool("COOKIE_SECURE", false)?,
        };

        let admin_fallback = AdminFallbackConfig {
            username: env_opt("ADMIN_USERNAME"),
            password: env_opt("ADMIN_PASSWORD"),
        };

        Ok(Self {
            database_url,
            db_min_conn,
            db_max_conn,
            run_migrations,
            port,
            kafka_broker,
            email_topic: env_opt("EMAIL_TOPIC").unwrap_or_else(|| "marketplace-email".into()),
            redis,
            session,
            bcrypt_cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            admin_email: env_opt("ADMIN_EMAIL"),
            admin_fallback,
            public_url: env_opt("PUBLIC_URL").unwrap_or_else(|| "http://localhost:5000".into()),
            upload_dir: env_opt("UPLOAD_DIR").unwrap_or_else(|| "./uploads".into()),
            otel_endpoint: env_opt("OTEL_ENDPOINT")
                .unwrap_or_else(|| "http://otel-collector:4317".into()),
            bank: BankConfig::init(),
        })
    }
}
