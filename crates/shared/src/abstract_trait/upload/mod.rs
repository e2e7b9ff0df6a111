use crate::{
    domain::responses::{ApiResponse, UploadResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUploadService = Arc<dyn UploadServiceTrait + Send + Sync>;

#[async_trait]
pub trait UploadServiceTrait {
    async fn store_image(
        &self,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<ApiResponse<UploadResponse>, ServiceError>;
}
