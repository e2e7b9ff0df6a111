use crate::{
    domain::responses::{ApiResponse, DashboardStatsResponse},
    errors::{RepositoryError, ServiceError},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynDashboardRepository = Arc<dyn DashboardRepositoryTrait + Send + Sync>;
pub type DynDashboardService = Arc<dyn DashboardServiceTrait + Send + Sync>;

#[async_trait]
pub trait DashboardRepositoryTrait {
    async fn stats(&self) -> Result<DashboardStatsResponse, RepositoryError>;
}

#[async_trait]
pub trait DashboardServiceTrait {
    async fn stats(&self) -> Result<ApiResponse<DashboardStatsResponse>, ServiceError>;
}
