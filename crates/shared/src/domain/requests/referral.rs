use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{default_page, default_page_size};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReferralRequest {
    #[validate(length(min = 2, max = 255, message = "Name is required"))]
    #[schema(example = "Dr. Amira Haddad")]
    pub referred_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub referred_email: String,

    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllReferrals {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,
}
