use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{default_page, default_page_size};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubscribeRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "nurse@clinic.example")]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllNewsletters {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,
}
