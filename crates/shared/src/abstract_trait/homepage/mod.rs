use crate::{
    domain::{
        requests::{
            CarouselPosition, CreateCarouselItemRequest, CreateFeaturedRequest,
            UpdateCarouselItemRequest, UpdateFeaturedRequest,
        },
        responses::{
            ApiResponse, CarouselItemResponse, FeaturedProductResponse, HomepageResponse,
        },
    },
    errors::{RepositoryError, ServiceError},
    model::{CarouselItem, FeaturedCarousel, FeaturedProduct},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCarouselRepository = Arc<dyn CarouselRepositoryTrait + Send + Sync>;
pub type DynFeaturedRepository = Arc<dyn FeaturedRepositoryTrait + Send + Sync>;
pub type DynHomepageService = Arc<dyn HomepageServiceTrait + Send + Sync>;

#[async_trait]
pub trait CarouselRepositoryTrait {
    async fn find_all(&self, active_only: bool) -> Result<Vec<CarouselItem>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<CarouselItem>, RepositoryError>;
    async fn create(&self, req: &CreateCarouselItemRequest)
    -> Result<CarouselItem, RepositoryError>;
    async fn update(&self, req: &UpdateCarouselItemRequest)
    -> Result<CarouselItem, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
    async fn reorder(&self, positions: &[CarouselPosition]) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait FeaturedRepositoryTrait {
    /// Featured rows joined with their product; `active_only` also hides
    /// inactive products.
    async fn find_all(&self, active_only: bool) -> Result<Vec<FeaturedProduct>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<FeaturedProduct>, RepositoryError>;
    async fn create(&self, req: &CreateFeaturedRequest)
    -> Result<FeaturedCarousel, RepositoryError>;
    async fn update(&self, req: &UpdateFeaturedRequest)
    -> Result<FeaturedCarousel, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait HomepageServiceTrait {
    async fn homepage(&self) -> Result<ApiResponse<HomepageResponse>, ServiceError>;
    async fn invalidate(&self);

    async fn list_carousel(
        &self,
        active_only: bool,
    ) -> Result<ApiResponse<Vec<CarouselItemResponse>>, ServiceError>;
    async fn create_carousel_item(
        &self,
        req: &CreateCarouselItemRequest,
    ) -> Result<ApiResponse<CarouselItemResponse>, ServiceError>;
    async fn update_carousel_item(
        &self,
        req: &UpdateCarouselItemRequest,
    ) -> Result<ApiResponse<CarouselItemResponse>, ServiceError>;
    async fn delete_carousel_item(&self, id: i32) -> Result<ApiResponse<()>, ServiceError>;
    async fn reorder_carousel(
        &self,
        positions: &[CarouselPosition],
    ) -> Result<ApiResponse<Vec<CarouselItemResponse>>, ServiceError>;

    async fn list_featured(
        &self,
        active_only: bool,
    ) -> Result<ApiResponse<Vec<FeaturedProductResponse>>, ServiceError>;
    async fn add_featured(
        &self,
        req: &CreateFeaturedRequest,
    ) -> Result<ApiResponse<FeaturedProductResponse>, ServiceError>;
    async fn update_featured(
        &self,
        req: &UpdateFeaturedRequest,
    ) -> Result<ApiResponse<FeaturedProductResponse>, ServiceError>;
    async fn remove_featured(&self, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
