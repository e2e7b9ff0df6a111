use async_trait::async_trait;
use deadpool_redis::Pool;
use tracing::{debug, error};

use crate::abstract_trait::RateLimiterTrait;

/// Fixed-window counter on `INCR` + `EXPIRE`.
#[derive(Clone)]
pub struct RateLimiter {
    redis_pool: Pool,
}

impl RateLimiter {
    pub fn new(redis_pool: Pool) -> Self {
        Self { redis_pool }
    }
}

#[async_trait]
impl RateLimiterTrait for RateLimiter {
    async fn check_rate_limit(
        &self,
        key: &str,
        max_requests: i64,
        window_seconds: i64,
    ) -> (bool, i64) {
        let mut conn = match self.redis_pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                // fail open
                error!("Failed to get Redis pooled connection: {:?}", e);
                return (true, 0);
            }
        };

        let result: redis::RedisResult<(i64,)> = redis::pipe()
            .atomic()
            .cmd("INCR")
            .arg(key)
            .cmd("EXPIRE")
            .arg(key)
            .arg(window_seconds)
            .arg("NX")
            .ignore()
            .query_async(&mut conn)
            .await;

        match result {
            Ok((current,)) => {
                if current > max_requests {
                    debug!("Rate limit exceeded for key: {key}");
                    (false, current)
                } else {
                    (true, current)
                }
            }
            Err(e) => {
                error!("Rate limit check failed for key '{key}': {:?}", e);
                (true, 0)
            }
        }
    }
}
