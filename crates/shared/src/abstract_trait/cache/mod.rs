use async_trait::async_trait;
use chrono::Duration;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::error;

pub type DynCacheStore = Arc<dyn CacheStoreTrait + Send + Sync>;

/// Best-effort key/value cache. Failures are logged by the implementation and
/// surface as misses.
#[async_trait]
pub trait CacheStoreTrait {
    async fn get_raw(&self, key: &str) -> Option<String>;
    async fn set_raw(&self, key: &str, value: &str, expiration: Duration);
    async fn delete(&self, key: &str);
}

impl dyn CacheStoreTrait + Send + Sync {
    pub async fn get_from_cache<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let data = self.get_raw(key).await?;

        match serde_json::from_str::<T>(&data) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                error!("Failed to deserialize cached value for key '{key}': {e:?}");
                None
            }
        }
    }

    pub async fn set_to_cache<T>(&self, key: &str, data: &T, expiration: Duration)
    where
        T: Serialize + Sync,
    {
        match serde_json::to_string(data) {
            Ok(json) => self.set_raw(key, &json, expiration).await,
            Err(e) => error!("Failed to serialize data for key '{key}': {e:?}"),
        }
    }
}
