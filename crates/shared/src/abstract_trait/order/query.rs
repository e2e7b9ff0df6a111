use crate::{
    domain::{
        requests::FindAllOrders,
        responses::{ApiResponse, ApiResponsePagination, OrderDetailResponse, OrderResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Order, OrderItem, OrderWithBuyer},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderWithBuyer>, i64), RepositoryError>;
    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithBuyer>, RepositoryError>;
    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError>;
}

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
    async fn find_mine(
        &self,
        user_id: i32,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    /// Orders belonging to someone else are reported as missing.
    async fn find_my_order(
        &self,
        user_id: i32,
        id: i32,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
}
