use crate::{
    abstract_trait::{DashboardServiceTrait, DynDashboardRepository},
    domain::responses::{ApiResponse, DashboardStatsResponse},
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct DashboardService {
    repository: DynDashboardRepository,
    tracer: ServiceTracer,
}

impl DashboardService {
    pub async fn new(repository: DynDashboardRepository, registry: Arc<Mutex<Registry>>) -> Self {
        Self {
            repository,
            tracer: ServiceTracer::new("dashboard_service", registry).await,
        }
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn stats(&self) -> Result<ApiResponse<DashboardStatsResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("DashboardStats", vec![KeyValue::new("component", "dashboard")]);

        let result = self
            .repository
            .stats()
            .await
            .map(|stats| ApiResponse::success("Dashboard stats retrieved", stats))
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Dashboard stats retrieved")
            .await
    }
}
