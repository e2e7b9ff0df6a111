use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Newsletter {
    pub newsletter_id: i32,
    pub email: String,
    pub created_at: Option<NaiveDateTime>,
}
