use async_trait::async_trait;
use std::sync::Arc;

pub type DynRateLimiter = Arc<dyn RateLimiterTrait + Send + Sync>;

#[async_trait]
pub trait RateLimiterTrait {
    /// Counts one hit against `key` and returns `(allowed, current)`.
    async fn check_rate_limit(&self, key: &str, max_requests: i64, window_seconds: i64)
    -> (bool, i64);
}
