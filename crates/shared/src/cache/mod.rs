mod cache_store;
mod rate_limiter;
mod session;

pub use self::cache_store::CacheStore;
pub use self::rate_limiter::RateLimiter;
pub use self::session::SessionStore;
