use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::Newsletter;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct NewsletterResponse {
    pub id: i32,
    pub email: String,
    pub created_at: Option<String>,
}

impl From<Newsletter> for NewsletterResponse {
    fn from(value: Newsletter) -> Self {
        NewsletterResponse {
            id: value.newsletter_id,
            email: value.email,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}
