use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::Referral;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ReferralResponse {
    pub id: i32,
    pub referrer_id: i32,
    pub referred_name: String,
    pub referred_email: String,
    pub message: Option<String>,
    pub created_at: Option<String>,
}

impl From<Referral> for ReferralResponse {
    fn from(value: Referral) -> Self {
        ReferralResponse {
            id: value.referral_id,
            referrer_id: value.referrer_id,
            referred_name: value.referred_name,
            referred_email: value.referred_email,
            message: value.message,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}
