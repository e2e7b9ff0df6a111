use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{Connection, Pool};
use redis::AsyncCommands;
use tracing::{debug, error, info};

use crate::{
    abstract_trait::SessionStoreTrait, domain::session::Session, errors::ServiceError,
};

const SESSION_PREFIX: &str = "session:";
const USER_INDEX_PREFIX: &str = "user_sessions:";

/// Sessions live under `session:<id>`. Doctor sessions are also listed in the
/// set `user_sessions:<user_id>`, which expires with the newest session.
#[derive(Clone)]
pub struct SessionStore {
    redis_pool: Pool,
}

impl SessionStore {
    pub fn new(redis_pool: Pool) -> Self {
        Self { redis_pool }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }

    fn index_key(user_id: i32) -> String {
        format!("{USER_INDEX_PREFIX}{user_id}")
    }

    async fn get_conn(&self) -> Option<Connection> {
        match self.redis_pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis pooled connection: {:?}", e);
                None
            }
        }
    }
}

#[async_trait]
impl SessionStoreTrait for SessionStore {
    async fn create_session(&self, session: &Session, ttl: Duration) -> Result<(), ServiceError> {
        let json_data = serde_json::to_string(session)
            .map_err(|e| ServiceError::Internal(format!("Failed to serialize session: {e}")))?;

        let mut conn = self
            .get_conn()
            .await
            .ok_or_else(|| ServiceError::Internal("Session store unavailable".into()))?;

        let seconds = ttl.num_seconds().max(1);
        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("SET")
            .arg(Self::key(&session.session_id))
            .arg(&json_data)
            .arg("EX")
            .arg(seconds)
            .ignore();

        if let Some(user_id) = session.doctor_id() {
            let index = Self::index_key(user_id);
            pipe.cmd("SADD")
                .arg(&index)
                .arg(&session.session_id)
                .ignore()
                .cmd("EXPIRE")
                .arg(&index)
                .arg(seconds)
                .ignore();
        }

        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| ServiceError::Internal(format!("Failed to create session: {e}")))?;

        debug!("Session created: {}", session.session_id);
        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> Option<Session> {
        let mut conn = self.get_conn().await?;
        let result: redis::RedisResult<Option<String>> = redis::cmd("GET")
            .arg(Self::key(session_id))
            .query_async(&mut conn)
            .await;

        match result {
            Ok(Some(data)) => match serde_json::from_str::<Session>(&data) {
                Ok(session) => Some(session),
                Err(e) => {
                    error!("Failed to deserialize session: {:?}", e);
                    None
                }
            },
            Ok(None) => {
                debug!("Session not found: {}", session_id);
                None
            }
            Err(e) => {
                error!("Redis get error for session {}: {:?}", session_id, e);
                None
            }
        }
    }

    async fn delete_session(&self, session_id: &str) -> bool {
        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        match redis::cmd("DEL")
            .arg(Self::key(session_id))
            .query_async::<i64>(&mut conn)
            .await
        {
            Ok(removed) => {
                debug!("Session deleted: {}", session_id);
                removed > 0
            }
            Err(e) => {
                error!("Failed to delete session {}: {:?}", session_id, e);
                false
            }
        }
    }

    async fn refresh_session(&self, session: &Session, ttl: Duration) -> bool {
        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        let seconds = ttl.num_seconds().max(1);
        let mut pipe = redis::pipe();
        pipe.cmd("EXPIRE")
            .arg(Self::key(&session.session_id))
            .arg(seconds);
        if let Some(user_id) = session.doctor_id() {
            pipe.cmd("EXPIRE")
                .arg(Self::index_key(user_id))
                .arg(seconds)
                .ignore();
        }

        match pipe.query_async::<(i64,)>(&mut conn).await {
            Ok((updated,)) => updated == 1,
            Err(e) => {
                error!(
                    "Failed to refresh session TTL {}: {:?}",
                    session.session_id, e
                );
                false
            }
        }
    }

    async fn delete_user_sessions(&self, user_id: i32) -> usize {
        let Some(mut conn) = self.get_conn().await else {
            return 0;
        };
        let index = Self::index_key(user_id);

        let session_ids: Vec<String> = match conn.smembers(&index).await {
            Ok(ids) => ids,
            Err(e) => {
                error!("Failed to list sessions of user {user_id}: {:?}", e);
                return 0;
            }
        };

        let mut keys: Vec<String> = session_ids.iter().map(|id| Self::key(id)).collect();
        keys.push(index);

        match conn.del::<_, usize>(&keys).await {
            Ok(removed) => {
                let ended = if session_ids.is_empty() {
                    0
                } else {
                    removed.saturating_sub(1)
                };
                info!("🔒 Ended {ended} session(s) of user {user_id}");
                ended
            }
            Err(e) => {
                error!("Failed to end sessions of user {user_id}: {:?}", e);
                0
            }
        }
    }
}
