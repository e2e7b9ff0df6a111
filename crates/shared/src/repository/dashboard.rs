use crate::{
    abstract_trait::DashboardRepositoryTrait, config::ConnectionPool,
    domain::responses::DashboardStatsResponse, errors::RepositoryError,
};
use async_trait::async_trait;
use tracing::error;

pub struct DashboardRepository {
    db: ConnectionPool,
}

impl DashboardRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DashboardRepositoryTrait for DashboardRepository {
    async fn stats(&self) -> Result<DashboardStatsResponse, RepositoryError> {
        sqlx::query_as::<_, DashboardStatsResponse>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_doctors,
                (SELECT COUNT(*) FROM users WHERE NOT is_approved) AS pending_doctors,
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM products WHERE is_active) AS active_products,
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COUNT(*) FROM orders WHERE status = 'pending') AS pending,
                (SELECT COUNT(*) FROM orders WHERE status = 'approved') AS approved,
                (SELECT COUNT(*) FROM orders WHERE status = 'declined') AS declined,
                (SELECT COUNT(*) FROM orders WHERE status = 'cancelled') AS cancelled,
                (SELECT COALESCE(SUM(total), 0)::BIGINT FROM orders WHERE status = 'approved')
                    AS approved_revenue,
                (SELECT COUNT(*) FROM newsletters) AS newsletter_subscribers
            "#,
        )
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to compute dashboard stats: {e:?}");
            RepositoryError::from(e)
        })
    }
}
