use crate::{
    domain::{
        requests::FindAllNewsletters,
        responses::{ApiResponse, ApiResponsePagination, NewsletterResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Newsletter,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynNewsletterRepository = Arc<dyn NewsletterRepositoryTrait + Send + Sync>;
pub type DynNewsletterService = Arc<dyn NewsletterServiceTrait + Send + Sync>;

#[async_trait]
pub trait NewsletterRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllNewsletters,
    ) -> Result<(Vec<Newsletter>, i64), RepositoryError>;
    async fn create(&self, email: &str) -> Result<Newsletter, RepositoryError>;
    async fn delete_by_email(&self, email: &str) -> Result<bool, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait NewsletterServiceTrait {
    async fn subscribe(&self, email: &str) -> Result<ApiResponse<NewsletterResponse>, ServiceError>;
    async fn unsubscribe(&self, email: &str) -> Result<ApiResponse<()>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllNewsletters,
    ) -> Result<ApiResponsePagination<Vec<NewsletterResponse>>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
