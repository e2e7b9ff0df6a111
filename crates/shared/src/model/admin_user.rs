use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUser {
    pub admin_id: i32,
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub created_at: Option<NaiveDateTime>,
}
