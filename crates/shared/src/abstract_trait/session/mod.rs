use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

use crate::{domain::session::Session, errors::ServiceError};

pub type DynSessionStore = Arc<dyn SessionStoreTrait + Send + Sync>;

#[async_trait]
pub trait SessionStoreTrait {
    async fn create_session(&self, session: &Session, ttl: Duration) -> Result<(), ServiceError>;
    async fn get_session(&self, session_id: &str) -> Option<Session>;
    async fn delete_session(&self, session_id: &str) -> bool;
    async fn refresh_session(&self, session: &Session, ttl: Duration) -> bool;

    /// Ends every session of a doctor. Returns how many were removed.
    async fn delete_user_sessions(&self, user_id: i32) -> usize;
}
