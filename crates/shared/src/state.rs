use crate::{
    abstract_trait::{
        DynCacheStore, DynEmailService, DynHashing, DynKafka, DynRateLimiter, DynSessionStore,
    },
    cache::{CacheStore, RateLimiter, SessionStore},
    config::{Config, ConnectionPool, Hashing, Kafka, RedisClient, SessionConfig},
    di::{DependenciesInject, DependenciesInjectDeps},
    domain::notifications::Notifications,
    service::EmailDispatcher,
    utils::{SystemMetrics, run_metrics_collector},
};
use anyhow::{Context, Result};
use chrono::Duration;
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub sessions: DynSessionStore,
    pub rate_limiter: DynRateLimiter,
    pub session_config: SessionConfig,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("sessions", &"<dyn SessionStore>")
            .field("rate_limiter", &"<dyn RateLimiter>")
            .field("session_config", &self.session_config)
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let registry = Arc::new(Mutex::new(Registry::default()));

        let redis = RedisClient::new(&config.redis).context("Failed to connect to Redis")?;
        redis
            .ping()
            .await
            .context("Failed to ping Redis server")?;

        let cache = Arc::new(CacheStore::new(redis.pool.clone())) as DynCacheStore;
        let sessions = Arc::new(SessionStore::new(redis.pool.clone())) as DynSessionStore;
        let rate_limiter = Arc::new(RateLimiter::new(redis.pool.clone())) as DynRateLimiter;

        let kafka = Arc::new(
            Kafka::new(&config.kafka_broker).context("Failed to create Kafka producer")?,
        ) as DynKafka;
        let email = Arc::new(EmailDispatcher::new(kafka, config.email_topic.clone()))
            as DynEmailService;

        let hash = Arc::new(Hashing::new(config.bcrypt_cost)) as DynHashing;

        let deps = DependenciesInjectDeps {
            pool,
            hash,
            email,
            cache,
            sessions: sessions.clone(),
            notifications: Notifications::new(
                config.public_url.clone(),
                config.admin_email.clone(),
            ),
            bank: config.bank.clone(),
            admin_fallback: config.admin_fallback.clone(),
            session_ttl: Duration::hours(config.session.ttl_hours),
            upload_dir: config.upload_dir.clone(),
            registry: registry.clone(),
        };

        if config.admin_fallback.credentials().is_some() {
            info!("🔑 Fallback admin credentials are enabled");
        }

        Ok(Self::from_parts(deps, sessions, rate_limiter, config.session.clone()).await)
    }

    /// Assembles the state from already-built adapters.
    pub async fn from_parts(
        deps: DependenciesInjectDeps,
        sessions: DynSessionStore,
        rate_limiter: DynRateLimiter,
        session_config: SessionConfig,
    ) -> Self {
        let registry = deps.registry.clone();
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(deps).await;

        registry.lock().await.register_metrics(&system_metrics);
        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Self {
            di_container,
            sessions,
            rate_limiter,
            session_config,
            registry,
            system_metrics,
        }
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
