use crate::{
    abstract_trait::{DynOrderQueryRepository, OrderQueryServiceTrait},
    config::BankConfig,
    domain::{
        order_status::{OrderStatus, PaymentMethod},
        requests::FindAllOrders,
        responses::{
            ApiResponse, ApiResponsePagination, BankDetailsResponse, OrderDetailResponse,
            OrderResponse, Pagination,
        },
    },
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::info;

pub struct OrderQueryService {
    repository: DynOrderQueryRepository,
    bank: BankConfig,
    tracer: ServiceTracer,
}

impl OrderQueryService {
    pub fn new(repository: DynOrderQueryRepository, bank: BankConfig, tracer: ServiceTracer) -> Self {
        Self {
            repository,
            bank,
            tracer,
        }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("FindAllOrders", vec![KeyValue::new("component", "order")]);

        let result = self
            .repository
            .find_all(req)
            .await
            .map(|(rows, total)| {
                ApiResponsePagination::success(
                    "Orders retrieved",
                    rows.into_iter()
                        .map(|row| OrderResponse::from(row.order))
                        .collect(),
                    Pagination::new(req.page, req.page_size, total),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Orders retrieved")
            .await
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "FindOrderById",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        let result = async {
            let row = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Order"))?;
            let items = self.repository.find_items(id).await?;

            Ok(ApiResponse::success(
                "Order retrieved",
                OrderDetailResponse::with_buyer(row, items),
            ))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Order retrieved")
            .await
    }

    async fn find_mine(
        &self,
        user_id: i32,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        info!("📦 Listing orders of user {user_id}");

        let tracing_ctx = self.tracer.start(
            "FindMyOrders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let result = self
            .repository
            .find_by_user(user_id, req)
            .await
            .map(|(orders, total)| {
                ApiResponsePagination::success(
                    "Orders retrieved",
                    orders.into_iter().map(OrderResponse::from).collect(),
                    Pagination::new(req.page, req.page_size, total),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Orders retrieved")
            .await
    }

    async fn find_my_order(
        &self,
        user_id: i32,
        id: i32,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "FindMyOrder",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", user_id.to_string()),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        let result = async {
            let row = self
                .repository
                .find_by_id(id)
                .await?
                .filter(|row| row.order.user_id == user_id)
                .ok_or_else(|| ServiceError::not_found("Order"))?;
            let items = self.repository.find_items(id).await?;

            let awaiting_transfer = row.order.status == OrderStatus::Pending.as_str()
                && row.order.payment_method == PaymentMethod::BankTransfer.as_str();

            let mut detail = OrderDetailResponse::new(row.order, items);
            if awaiting_transfer {
                detail.bank_details = Some(BankDetailsResponse::from(&self.bank));
            }

            Ok(ApiResponse::success("Order retrieved", detail))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Order retrieved")
            .await
    }
}
