use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Referral {
    pub referral_id: i32,
    pub referrer_id: i32,
    pub referred_name: String,
    pub referred_email: String,
    pub message: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}
