use crate::{
    abstract_trait::{DynCacheStore, DynProductCommandRepository, ProductCommandServiceTrait},
    domain::{
        requests::{CreateProductRequest, UpdateProductRequest},
        responses::{ApiResponse, ProductResponse},
    },
    errors::ServiceError,
    service::{duplicate_as_conflict, homepage::HOMEPAGE_CACHE_KEY, require_slug},
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::info;

pub struct ProductCommandService {
    repository: DynProductCommandRepository,
    cache: DynCacheStore,
    tracer: ServiceTracer,
}

impl ProductCommandService {
    pub fn new(
        repository: DynProductCommandRepository,
        cache: DynCacheStore,
        tracer: ServiceTracer,
    ) -> Self {
        Self {
            repository,
            cache,
            tracer,
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating product: {}", req.name);

        let tracing_ctx = self.tracer.start(
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        let result = async {
            let slug = require_slug(req.slug.as_deref(), &req.name)?;
            let product = self
                .repository
                .create_product(req, &slug)
                .await
                .map_err(|e| {
                    duplicate_as_conflict(e, "A product with this slug already exists")
                })?;

            self.cache.delete(HOMEPAGE_CACHE_KEY).await;
            Ok(ApiResponse::success(
                "Product created",
                ProductResponse::from(product),
            ))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Post, result, "Product created")
            .await
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔄 Updating product ID {}", req.id);

        let tracing_ctx = self.tracer.start(
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", req.id.to_string()),
            ],
        );

        let result = async {
            let slug = require_slug(req.slug.as_deref(), &req.name)?;
            let product = self
                .repository
                .update_product(req, &slug)
                .await
                .map_err(|e| {
                    duplicate_as_conflict(e, "A product with this slug already exists")
                })?;

            self.cache.delete(HOMEPAGE_CACHE_KEY).await;
            Ok(ApiResponse::success(
                "Product updated",
                ProductResponse::from(product),
            ))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Put, result, "Product updated")
            .await
    }

    async fn delete_product(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting product ID {id}");

        let tracing_ctx = self.tracer.start(
            "DeleteProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = match self.repository.delete_product(id).await {
            Ok(()) => {
                self.cache.delete(HOMEPAGE_CACHE_KEY).await;
                Ok(ApiResponse::success("Product deleted", ()))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Delete, result, "Product deleted")
            .await
    }
}
