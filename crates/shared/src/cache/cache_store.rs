use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{Connection, Pool};
use redis::AsyncCommands;
use tracing::{debug, error};

use crate::abstract_trait::CacheStoreTrait;

const CACHE_PREFIX: &str = "cache:";

/// Read-through cache for public pages. Every Redis failure degrades to a
/// miss so callers fall back to the database.
#[derive(Clone)]
pub struct CacheStore {
    redis_pool: Pool,
}

impl CacheStore {
    pub fn new(redis_pool: Pool) -> Self {
        Self { redis_pool }
    }

    fn key(key: &str) -> String {
        format!("{CACHE_PREFIX}{key}")
    }

    async fn conn(&self) -> Option<Connection> {
        self.redis_pool
            .get()
            .await
            .inspect_err(|e| error!("❌ Redis pool exhausted for cache: {e}"))
            .ok()
    }
}

#[async_trait]
impl CacheStoreTrait for CacheStore {
    async fn get_raw(&self, key: &str) -> Option<String> {
        let mut conn = self.conn().await?;

        match conn.get::<_, Option<String>>(Self::key(key)).await {
            Ok(hit) => {
                debug!(key, hit = hit.is_some(), "Cache lookup");
                hit
            }
            Err(e) => {
                error!("❌ Cache read failed for '{key}': {e}");
                None
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str, expiration: Duration) {
        let Some(mut conn) = self.conn().await else {
            return;
        };
        let ttl = expiration.num_seconds().max(1) as u64;

        if let Err(e) = conn.set_ex::<_, _, ()>(Self::key(key), value, ttl).await {
            error!("❌ Cache write failed for '{key}': {e}");
        }
    }

    async fn delete(&self, key: &str) {
        let Some(mut conn) = self.conn().await else {
            return;
        };

        if let Err(e) = conn.del::<_, ()>(Self::key(key)).await {
            error!("❌ Cache invalidation failed for '{key}': {e}");
        }
    }
}
