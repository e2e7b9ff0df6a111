use crate::{
    abstract_trait::{DynNewsletterRepository, NewsletterServiceTrait},
    domain::{
        requests::FindAllNewsletters,
        responses::{ApiResponse, ApiResponsePagination, NewsletterResponse, Pagination},
    },
    errors::ServiceError,
    service::duplicate_as_conflict,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct NewsletterService {
    repository: DynNewsletterRepository,
    tracer: ServiceTracer,
}

impl NewsletterService {
    pub async fn new(repository: DynNewsletterRepository, registry: Arc<Mutex<Registry>>) -> Self {
        Self {
            repository,
            tracer: ServiceTracer::new("newsletter_service", registry).await,
        }
    }
}

#[async_trait]
impl NewsletterServiceTrait for NewsletterService {
    async fn subscribe(&self, email: &str) -> Result<ApiResponse<NewsletterResponse>, ServiceError> {
        let email = email.trim().to_lowercase();
        let tracing_ctx = self
            .tracer
            .start("Subscribe", vec![KeyValue::new("component", "newsletter")]);

        let result = self
            .repository
            .create(&email)
            .await
            .map(|row| ApiResponse::success("Subscribed", NewsletterResponse::from(row)))
            .map_err(|e| duplicate_as_conflict(e, "This email is already subscribed"));

        self.tracer
            .record(&tracing_ctx, Method::Post, result, "Subscribed")
            .await
    }

    async fn unsubscribe(&self, email: &str) -> Result<ApiResponse<()>, ServiceError> {
        let email = email.trim().to_lowercase();
        let tracing_ctx = self
            .tracer
            .start("Unsubscribe", vec![KeyValue::new("component", "newsletter")]);

        let result = match self.repository.delete_by_email(&email).await {
            Ok(true) => {
                info!("📭 Newsletter subscription removed");
                Ok(ApiResponse::success("Unsubscribed", ()))
            }
            Ok(false) => Err(ServiceError::not_found("Subscription")),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Post, result, "Unsubscribed")
            .await
    }

    async fn find_all(
        &self,
        req: &FindAllNewsletters,
    ) -> Result<ApiResponsePagination<Vec<NewsletterResponse>>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "FindAllSubscribers",
            vec![KeyValue::new("component", "newsletter")],
        );

        let result = self
            .repository
            .find_all(req)
            .await
            .map(|(rows, total)| {
                ApiResponsePagination::success(
                    "Subscribers retrieved",
                    rows.into_iter().map(NewsletterResponse::from).collect(),
                    Pagination::new(req.page, req.page_size, total),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Subscribers retrieved")
            .await
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "DeleteSubscriber",
            vec![
                KeyValue::new("component", "newsletter"),
                KeyValue::new("newsletter.id", id.to_string()),
            ],
        );

        let result = match self.repository.delete(id).await {
            Ok(true) => Ok(ApiResponse::success("Subscriber deleted", ())),
            Ok(false) => Err(ServiceError::not_found("Subscriber")),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Delete, result, "Subscriber deleted")
            .await
    }
}
