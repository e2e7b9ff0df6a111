use crate::{
    domain::{
        requests::{CreateProductRequest, UpdateProductRequest},
        responses::{ApiResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Product as ProductModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        slug: &str,
    ) -> Result<ProductModel, RepositoryError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
        slug: &str,
    ) -> Result<ProductModel, RepositoryError>;
    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_product(&self, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
