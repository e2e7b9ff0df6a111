use crate::{
    abstract_trait::OrderQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllOrders, page_window, search_pattern},
    errors::RepositoryError,
    model::{Order, OrderItem, OrderWithBuyer},
    repository::fetch_counted,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderWithBuyer>, i64), RepositoryError> {
        info!(
            "🔍 Fetching orders (page={}, size={}, status={:?})",
            req.page, req.page_size, req.status
        );

        let (limit, offset) = page_window(req.page, req.page_size);

        let search = search_pattern(&req.search);
        let db = &self.db;

        fetch_counted(limit, offset, move |limit, offset| {
            sqlx::query(
                r#"
                SELECT o.*,
                       u.email AS buyer_email,
                       (u.first_name || ' ' || u.last_name) AS buyer_name,
                       COUNT(*) OVER() AS total_count
                FROM orders o
                JOIN users u ON u.user_id = o.user_id
                WHERE ($1::TEXT IS NULL
                       OR o.order_number ILIKE '%' || $1 || '%'
                       OR u.email ILIKE '%' || $1 || '%')
                  AND ($2::TEXT IS NULL OR o.status = $2)
                ORDER BY o.created_at DESC, o.order_id DESC
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(search.clone())
            .bind(req.status.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
        })
        .await
        .inspect_err(|e| error!("❌ Failed to fetch orders: {e:?}"))
    }

    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let (limit, offset) = page_window(req.page, req.page_size);

        let search = search_pattern(&req.search);
        let db = &self.db;

        fetch_counted(limit, offset, move |limit, offset| {
            sqlx::query(
                r#"
                SELECT o.*, COUNT(*) OVER() AS total_count
                FROM orders o
                WHERE o.user_id = $1
                  AND ($2::TEXT IS NULL OR o.order_number ILIKE '%' || $2 || '%')
                  AND ($3::TEXT IS NULL OR o.status = $3)
                ORDER BY o.created_at DESC, o.order_id DESC
                LIMIT $4 OFFSET $5
                "#,
            )
            .bind(user_id)
            .bind(search.clone())
            .bind(req.status.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
        })
        .await
        .inspect_err(|e| error!("❌ Failed to fetch orders of user {user_id}: {e:?}"))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithBuyer>, RepositoryError> {
        sqlx::query_as::<_, OrderWithBuyer>(
            r#"
            SELECT o.*,
                   u.email AS buyer_email,
                   (u.first_name || ' ' || u.last_name) AS buyer_name
            FROM orders o
            JOIN users u ON u.user_id = o.user_id
            WHERE o.order_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
        sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY order_item_id",
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch items of order {order_id}: {e:?}");
            RepositoryError::from(e)
        })
    }
}
