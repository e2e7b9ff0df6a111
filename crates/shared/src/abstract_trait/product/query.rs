use crate::{
    domain::{
        requests::FindAllProducts,
        responses::{ApiResponse, ApiResponsePagination, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Product as ProductModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllProducts,
        active_only: bool,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProductModel>, RepositoryError>;
}

#[async_trait]
pub trait ProductQueryServiceTrait {
    /// Storefront listing; inactive products are hidden.
    async fn find_active(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    /// Admin listing including inactive products.
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        id: i32,
        include_inactive: bool,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn find_by_slug(&self, slug: &str) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}
