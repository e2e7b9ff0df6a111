use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq, FromRow)]
pub struct OrderStatusCounts {
    pub pending: i64,
    pub approved: i64,
    pub declined: i64,
    pub cancelled: i64,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq, FromRow)]
pub struct DashboardStatsResponse {
    pub total_doctors: i64,
    pub pending_doctors: i64,
    pub total_products: i64,
    pub active_products: i64,
    pub total_orders: i64,
    #[sqlx(flatten)]
    pub orders_by_status: OrderStatusCounts,
    /// Sum of approved order totals, in cents.
    pub approved_revenue: i64,
    pub newsletter_subscribers: i64,
}
