use crate::{
    domain::{
        requests::{CreateTaxonomyRequest, UpdateTaxonomyRequest},
        responses::{ApiResponse, TaxonomyResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Taxonomy as TaxonomyModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTaxonomyRepository = Arc<dyn TaxonomyRepositoryTrait + Send + Sync>;
pub type DynTaxonomyService = Arc<dyn TaxonomyServiceTrait + Send + Sync>;

/// Storage for one taxonomy table, categories or brands.
#[async_trait]
pub trait TaxonomyRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<TaxonomyModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<TaxonomyModel>, RepositoryError>;
    async fn create(
        &self,
        req: &CreateTaxonomyRequest,
        slug: &str,
    ) -> Result<TaxonomyModel, RepositoryError>;
    async fn update(
        &self,
        req: &UpdateTaxonomyRequest,
        slug: &str,
    ) -> Result<TaxonomyModel, RepositoryError>;
    async fn update_image(&self, id: i32, image_url: &str) -> Result<TaxonomyModel, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait TaxonomyServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<TaxonomyResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<TaxonomyResponse>, ServiceError>;
    async fn create(
        &self,
        req: &CreateTaxonomyRequest,
    ) -> Result<ApiResponse<TaxonomyResponse>, ServiceError>;
    async fn update(
        &self,
        req: &UpdateTaxonomyRequest,
    ) -> Result<ApiResponse<TaxonomyResponse>, ServiceError>;
    async fn update_image(
        &self,
        id: i32,
        image_url: &str,
    ) -> Result<ApiResponse<TaxonomyResponse>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
