use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::info;

pub type ConnectionPool = Pool<Postgres>;

pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn new_pool(
        connection_string: &str,
        min_connections: u32,
        max_connections: u32,
    ) -> anyhow::Result<ConnectionPool> {
        let pool = PgPoolOptions::new()
            .min_connections(min_connections)
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(connection_string)
            .await
            .map_err(|err| anyhow::anyhow!("Failed to create database connection pool: {}", err))?;

        info!("✅ Database pool ready (min={min_connections}, max={max_connections})");

        Ok(pool)
    }

    pub async fn run_migrations(pool: &ConnectionPool) -> anyhow::Result<()> {
        info!("🗄️ Running database migrations");

        sqlx::migrate!("./migrations").run(pool).await?;

        info!("✅ Database migrations applied");
        Ok(())
    }
}
