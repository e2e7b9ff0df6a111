use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::{
        requests::FindAllProducts,
        responses::{ApiResponse, ApiResponsePagination, Pagination, ProductResponse},
    },
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::info;

pub struct ProductQueryService {
    repository: DynProductQueryRepository,
    tracer: ServiceTracer,
}

impl ProductQueryService {
    pub fn new(repository: DynProductQueryRepository, tracer: ServiceTracer) -> Self {
        Self { repository, tracer }
    }

    async fn list(
        &self,
        req: &FindAllProducts,
        active_only: bool,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!(
            "🔍 Listing products (page={}, size={}, search={:?}, sort={:?}, active_only={active_only})",
            req.page, req.page_size, req.search, req.sort
        );

        let tracing_ctx = self.tracer.start(
            "FindAllProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("active_only", active_only),
            ],
        );

        let result = self
            .repository
            .find_all(req, active_only)
            .await
            .map(|(products, total)| {
                ApiResponsePagination::success(
                    "Products retrieved",
                    products.into_iter().map(ProductResponse::from).collect(),
                    Pagination::new(req.page, req.page_size, total),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Products retrieved")
            .await
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_active(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        self.list(req, true).await
    }

    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        self.list(req, false).await
    }

    async fn find_by_id(
        &self,
        id: i32,
        include_inactive: bool,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "FindProductById",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = match self.repository.find_by_id(id).await {
            Ok(Some(product)) if include_inactive || product.is_active => Ok(
                ApiResponse::success("Product retrieved", ProductResponse::from(product)),
            ),
            Ok(_) => Err(ServiceError::not_found("Product")),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Product retrieved")
            .await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "FindProductBySlug",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.slug", slug.to_string()),
            ],
        );

        let result = match self.repository.find_by_slug(slug).await {
            Ok(Some(product)) if product.is_active => Ok(ApiResponse::success(
                "Product retrieved",
                ProductResponse::from(product),
            )),
            Ok(_) => Err(ServiceError::not_found("Product")),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Product retrieved")
            .await
    }
}
