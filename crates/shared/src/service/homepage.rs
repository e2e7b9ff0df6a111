use crate::{
    abstract_trait::{
        DynCacheStore, DynCarouselRepository, DynFeaturedRepository, DynTaxonomyRepository,
        HomepageServiceTrait,
    },
    domain::{
        requests::{
            CarouselPosition, CreateCarouselItemRequest, CreateFeaturedRequest,
            UpdateCarouselItemRequest, UpdateFeaturedRequest,
        },
        responses::{
            ApiResponse, CarouselItemResponse, FeaturedProductResponse, HomepageResponse,
            TaxonomyResponse,
        },
    },
    errors::ServiceError,
    service::duplicate_as_conflict,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use chrono::Duration;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub const HOMEPAGE_CACHE_KEY: &str = "homepage:v1";
const HOMEPAGE_CACHE_MINUTES: i64 = 10;

pub struct HomepageServiceDeps {
    pub carousel: DynCarouselRepository,
    pub featured: DynFeaturedRepository,
    pub categories: DynTaxonomyRepository,
    pub brands: DynTaxonomyRepository,
    pub cache: DynCacheStore,
    pub registry: Arc<Mutex<Registry>>,
}

pub struct HomepageService {
    carousel: DynCarouselRepository,
    featured: DynFeaturedRepository,
    categories: DynTaxonomyRepository,
    brands: DynTaxonomyRepository,
    cache: DynCacheStore,
    tracer: ServiceTracer,
}

impl HomepageService {
    pub async fn new(deps: HomepageServiceDeps) -> Self {
        let HomepageServiceDeps {
            carousel,
            featured,
            categories,
            brands,
            cache,
            registry,
        } = deps;

        Self {
            carousel,
            featured,
            categories,
            brands,
            cache,
            tracer: ServiceTracer::new("homepage_service", registry).await,
        }
    }

    async fn build(&self) -> Result<HomepageResponse, ServiceError> {
        let carousel = self.carousel.find_all(true).await?;
        let featured = self.featured.find_all(true).await?;
        let categories = self.categories.find_all().await?;
        let brands = self.brands.find_all().await?;

        Ok(HomepageResponse {
            carousel: carousel.into_iter().map(CarouselItemResponse::from).collect(),
            featured: featured
                .into_iter()
                .map(FeaturedProductResponse::from)
                .collect(),
            categories: categories.into_iter().map(TaxonomyResponse::from).collect(),
            brands: brands.into_iter().map(TaxonomyResponse::from).collect(),
        })
    }

    async fn featured_entry(&self, id: i32) -> Result<FeaturedProductResponse, ServiceError> {
        self.featured
            .find_by_id(id)
            .await?
            .map(FeaturedProductResponse::from)
            .ok_or_else(|| ServiceError::not_found("Featured product"))
    }

    fn attributes(operation_target: &str, id: i32) -> Vec<KeyValue> {
        vec![
            KeyValue::new("component", "homepage"),
            KeyValue::new(format!("{operation_target}.id"), id.to_string()),
        ]
    }
}

#[async_trait]
impl HomepageServiceTrait for HomepageService {
    async fn homepage(&self) -> Result<ApiResponse<HomepageResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("Homepage", vec![KeyValue::new("component", "homepage")]);

        if let Some(cached) = self
            .cache
            .get_from_cache::<HomepageResponse>(HOMEPAGE_CACHE_KEY)
            .await
        {
            info!("✅ Homepage served from cache");
            self.tracer
                .success(&tracing_ctx, Method::Get, "Homepage served from cache")
                .await;
            return Ok(ApiResponse::success("Homepage retrieved", cached));
        }

        let result = match self.build().await {
            Ok(page) => {
                self.cache
                    .set_to_cache(
                        HOMEPAGE_CACHE_KEY,
                        &page,
                        Duration::minutes(HOMEPAGE_CACHE_MINUTES),
                    )
                    .await;
                Ok(ApiResponse::success("Homepage retrieved", page))
            }
            Err(e) => Err(e),
        };

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Homepage built")
            .await
    }

    async fn invalidate(&self) {
        self.cache.delete(HOMEPAGE_CACHE_KEY).await;
        info!("🧹 Homepage cache invalidated");
    }

    async fn list_carousel(
        &self,
        active_only: bool,
    ) -> Result<ApiResponse<Vec<CarouselItemResponse>>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("ListCarousel", vec![KeyValue::new("component", "homepage")]);

        let result = self
            .carousel
            .find_all(active_only)
            .await
            .map(|items| {
                ApiResponse::success(
                    "Carousel retrieved",
                    items.into_iter().map(CarouselItemResponse::from).collect(),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Carousel retrieved")
            .await
    }

    async fn create_carousel_item(
        &self,
        req: &CreateCarouselItemRequest,
    ) -> Result<ApiResponse<CarouselItemResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "CreateCarouselItem",
            vec![KeyValue::new("component", "homepage")],
        );

        let result = match self.carousel.create(req).await {
            Ok(item) => {
                self.invalidate().await;
                Ok(ApiResponse::success(
                    "Carousel item created",
                    CarouselItemResponse::from(item),
                ))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Post, result, "Carousel item created")
            .await
    }

    async fn update_carousel_item(
        &self,
        req: &UpdateCarouselItemRequest,
    ) -> Result<ApiResponse<CarouselItemResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("UpdateCarouselItem", Self::attributes("carousel", req.id));

        let result = match self.carousel.update(req).await {
            Ok(item) => {
                self.invalidate().await;
                Ok(ApiResponse::success(
                    "Carousel item updated",
                    CarouselItemResponse::from(item),
                ))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Put, result, "Carousel item updated")
            .await
    }

    async fn delete_carousel_item(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("DeleteCarouselItem", Self::attributes("carousel", id));

        let result = match self.carousel.delete(id).await {
            Ok(()) => {
                self.invalidate().await;
                Ok(ApiResponse::success("Carousel item deleted", ()))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Delete, result, "Carousel item deleted")
            .await
    }

    async fn reorder_carousel(
        &self,
        positions: &[CarouselPosition],
    ) -> Result<ApiResponse<Vec<CarouselItemResponse>>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "ReorderCarousel",
            vec![
                KeyValue::new("component", "homepage"),
                KeyValue::new("carousel.count", positions.len() as i64),
            ],
        );

        let result = async {
            if positions.is_empty() {
                return Err(ServiceError::validation("At least one item is required"));
            }

            self.carousel.reorder(positions).await?;
            self.invalidate().await;

            let items = self.carousel.find_all(false).await?;
            Ok(ApiResponse::success(
                "Carousel reordered",
                items.into_iter().map(CarouselItemResponse::from).collect(),
            ))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Put, result, "Carousel reordered")
            .await
    }

    async fn list_featured(
        &self,
        active_only: bool,
    ) -> Result<ApiResponse<Vec<FeaturedProductResponse>>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("ListFeatured", vec![KeyValue::new("component", "homepage")]);

        let result = self
            .featured
            .find_all(active_only)
            .await
            .map(|rows| {
                ApiResponse::success(
                    "Featured products retrieved",
                    rows.into_iter().map(FeaturedProductResponse::from).collect(),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Featured products retrieved")
            .await
    }

    async fn add_featured(
        &self,
        req: &CreateFeaturedRequest,
    ) -> Result<ApiResponse<FeaturedProductResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("AddFeatured", Self::attributes("product", req.product_id));

        let result = async {
            let row = self
                .featured
                .create(req)
                .await
                .map_err(|e| duplicate_as_conflict(e, "This product is already featured"))?;

            self.invalidate().await;
            let entry = self.featured_entry(row.featured_id).await?;
            Ok(ApiResponse::success("Product featured", entry))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Post, result, "Product featured")
            .await
    }

    async fn update_featured(
        &self,
        req: &UpdateFeaturedRequest,
    ) -> Result<ApiResponse<FeaturedProductResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("UpdateFeatured", Self::attributes("featured", req.id));

        let result = async {
            let row = self.featured.update(req).await?;
            self.invalidate().await;

            let entry = self.featured_entry(row.featured_id).await?;
            Ok(ApiResponse::success("Featured product updated", entry))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Put, result, "Featured product updated")
            .await
    }

    async fn remove_featured(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("RemoveFeatured", Self::attributes("featured", id));

        let result = match self.featured.delete(id).await {
            Ok(()) => {
                self.invalidate().await;
                Ok(ApiResponse::success("Featured product removed", ()))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Delete, result, "Featured product removed")
            .await
    }
}
