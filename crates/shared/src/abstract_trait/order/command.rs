use crate::{
    domain::{
        order_status::OrderStatus,
        requests::{
            CancelOrderRequest, CheckoutRequest, DeclineOrderRequest, NewOrder,
            SubmitPaymentRequest,
        },
        responses::{ApiResponse, BankDetailsResponse, OrderDetailResponse, OrderResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Order,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;
pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Writes the order, its items and the stock decrements, then empties the
    /// buyer's cart. All or nothing.
    async fn create_order(&self, order: &NewOrder) -> Result<Order, RepositoryError>;

    /// Moves a pending order to `next`. Returns `None` when the order is no
    /// longer pending. Items are restocked when `next` releases stock.
    async fn transition(
        &self,
        order_id: i32,
        next: OrderStatus,
        reason: Option<&str>,
    ) -> Result<Option<Order>, RepositoryError>;

    /// Records a bank transfer reference on a pending bank-transfer order.
    async fn submit_payment(
        &self,
        order_id: i32,
        user_id: i32,
        reference: &str,
    ) -> Result<Option<Order>, RepositoryError>;
}

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn checkout(
        &self,
        user_id: i32,
        req: &CheckoutRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
    async fn cancel_my_order(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn approve_order(&self, order_id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn decline_order(
        &self,
        order_id: i32,
        req: &DeclineOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn cancel_order(
        &self,
        order_id: i32,
        req: &CancelOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    fn bank_details(&self) -> ApiResponse<BankDetailsResponse>;
    async fn submit_payment(
        &self,
        user_id: i32,
        order_id: i32,
        req: &SubmitPaymentRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
