use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Pagination;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponsePagination<T> {
    pub status: String,
    pub message: String,
    pub data: T,
    pub pagination: Pagination,
}

impl<T> ApiResponsePagination<T> {
    pub fn success(message: impl Into<String>, data: T, pagination: Pagination) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
            pagination,
        }
    }
}
