use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
    pub content_type: String,
    pub size: u64,
}
