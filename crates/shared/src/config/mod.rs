mod database;
mod hashing;
mod kafka;
mod myconfig;
mod redis;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::hashing::Hashing;
pub use self::kafka::Kafka;
pub use self::myconfig::{
    AdminFallbackConfig, BankConfig, Config, EmailConfig, SessionConfig, env_bool, env_opt,
    env_or,
};
pub use self::redis::{RedisClient, RedisConfig};
