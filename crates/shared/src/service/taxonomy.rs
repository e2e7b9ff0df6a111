use crate::{
    abstract_trait::{DynCacheStore, DynTaxonomyRepository, TaxonomyServiceTrait},
    domain::{
        requests::{CreateTaxonomyRequest, UpdateTaxonomyRequest},
        responses::{ApiResponse, TaxonomyResponse},
    },
    errors::ServiceError,
    model::TaxonomyKind,
    service::{duplicate_as_conflict, homepage::HOMEPAGE_CACHE_KEY, require_slug},
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Admin CRUD over categories or brands. Every write drops the cached homepage.
pub struct TaxonomyService {
    kind: TaxonomyKind,
    repository: DynTaxonomyRepository,
    cache: DynCacheStore,
    tracer: ServiceTracer,
}

impl TaxonomyService {
    pub async fn new(
        kind: TaxonomyKind,
        repository: DynTaxonomyRepository,
        cache: DynCacheStore,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        Self {
            kind,
            repository,
            cache,
            tracer: ServiceTracer::new(kind.service_name(), registry).await,
        }
    }

    fn operation(&self, verb: &str) -> String {
        format!("{verb}{}", self.kind.label())
    }

    fn message(&self, what: &str) -> String {
        format!("{} {what}", self.kind.label())
    }

    fn attributes(&self, id: i32) -> Vec<KeyValue> {
        vec![
            KeyValue::new("component", self.kind.name()),
            KeyValue::new(format!("{}.id", self.kind.name()), id.to_string()),
        ]
    }

    fn slug_taken(&self) -> String {
        format!("A {} with this slug already exists", self.kind.name())
    }
}

#[async_trait]
impl TaxonomyServiceTrait for TaxonomyService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<TaxonomyResponse>>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            &self.operation("FindAll"),
            vec![KeyValue::new("component", self.kind.name())],
        );
        let message = self.message("list retrieved");

        let result = self
            .repository
            .find_all()
            .await
            .map(|rows| {
                ApiResponse::success(
                    message.clone(),
                    rows.into_iter().map(TaxonomyResponse::from).collect(),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Get, result, &message)
            .await
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<TaxonomyResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start(&self.operation("Find"), self.attributes(id));
        let message = self.message("retrieved");

        let result = match self.repository.find_by_id(id).await {
            Ok(Some(row)) => Ok(ApiResponse::success(
                message.clone(),
                TaxonomyResponse::from(row),
            )),
            Ok(None) => Err(ServiceError::not_found(self.kind.label())),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Get, result, &message)
            .await
    }

    async fn create(
        &self,
        req: &CreateTaxonomyRequest,
    ) -> Result<ApiResponse<TaxonomyResponse>, ServiceError> {
        info!("📂 Creating {}: {}", self.kind.name(), req.name);

        let tracing_ctx = self.tracer.start(
            &self.operation("Create"),
            vec![
                KeyValue::new("component", self.kind.name()),
                KeyValue::new(format!("{}.name", self.kind.name()), req.name.clone()),
            ],
        );
        let message = self.message("created");

        let result = async {
            let slug = require_slug(req.slug.as_deref(), &req.name)?;
            let row = self
                .repository
                .create(req, &slug)
                .await
                .map_err(|e| duplicate_as_conflict(e, &self.slug_taken()))?;

            self.cache.delete(HOMEPAGE_CACHE_KEY).await;
            Ok(ApiResponse::success(
                message.clone(),
                TaxonomyResponse::from(row),
            ))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Post, result, &message)
            .await
    }

    async fn update(
        &self,
        req: &UpdateTaxonomyRequest,
    ) -> Result<ApiResponse<TaxonomyResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start(&self.operation("Update"), self.attributes(req.id));
        let message = self.message("updated");

        let result = async {
            let slug = require_slug(req.slug.as_deref(), &req.name)?;
            let row = self
                .repository
                .update(req, &slug)
                .await
                .map_err(|e| duplicate_as_conflict(e, &self.slug_taken()))?;

            self.cache.delete(HOMEPAGE_CACHE_KEY).await;
            Ok(ApiResponse::success(
                message.clone(),
                TaxonomyResponse::from(row),
            ))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Put, result, &message)
            .await
    }

    async fn update_image(
        &self,
        id: i32,
        image_url: &str,
    ) -> Result<ApiResponse<TaxonomyResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start(&self.operation("UpdateImage"), self.attributes(id));
        let message = self.message("image updated");

        let result = match self.repository.update_image(id, image_url).await {
            Ok(row) => {
                self.cache.delete(HOMEPAGE_CACHE_KEY).await;
                Ok(ApiResponse::success(
                    message.clone(),
                    TaxonomyResponse::from(row),
                ))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Patch, result, &message)
            .await
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start(&self.operation("Delete"), self.attributes(id));
        let message = self.message("deleted");

        let result = match self.repository.delete(id).await {
            Ok(()) => {
                self.cache.delete(HOMEPAGE_CACHE_KEY).await;
                Ok(ApiResponse::success(message.clone(), ()))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Delete, result, &message)
            .await
    }
}
