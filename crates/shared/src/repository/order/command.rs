use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    config::ConnectionPool,
    domain::{order_status::OrderStatus, requests::NewOrder},
    errors::RepositoryError,
    model::Order,
};
use async_trait::async_trait;
use tracing::{error, info, warn};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, new_order: &NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                order_number, user_id, status, payment_method, total, shipping_address, notes
            )
            VALUES ($1, $2, 'pending', $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new_order.order_number)
        .bind(new_order.user_id)
        .bind(new_order.payment_method.as_str())
        .bind(new_order.total)
        .bind(&new_order.shipping_address)
        .bind(&new_order.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert order {}: {e:?}", new_order.order_number);
            RepositoryError::from(e)
        })?;

        for item in &new_order.items {
            let reserved = sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - $2, updated_at = current_timestamp
                WHERE product_id = $1 AND is_active AND stock >= $2
                "#,
            )
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

            if reserved.rows_affected() == 0 {
                warn!(
                    "⚠️ Not enough stock for product {} ({}) while placing {}",
                    item.product_id, item.product_name, new_order.order_number
                );
                return Err(RepositoryError::InsufficientStock(format!(
                    "Not enough stock for '{}'",
                    item.product_name
                )));
            }

            sqlx::query(
                r#"
                INSERT INTO order_items (
                    order_id, product_id, product_name, product_price,
                    product_image, quantity, subtotal
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(order.order_id)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(item.product_price)
            .bind(&item.product_image)
            .bind(item.quantity)
            .bind(item.subtotal)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;
        }

        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(new_order.user_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Placed order {} (ID {}) with {} item(s)",
            order.order_number,
            order.order_id,
            new_order.items.len()
        );
        Ok(order)
    }

    async fn transition(
        &self,
        order_id: i32,
        next: OrderStatus,
        reason: Option<&str>,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $2,
                decline_reason = COALESCE($3, decline_reason),
                updated_at = current_timestamp
            WHERE order_id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(next.as_str())
        .bind(reason)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to move order {order_id} to {next}: {e:?}");
            RepositoryError::from(e)
        })?;

        let Some(order) = order else {
            return Ok(None);
        };

        if next.releases_stock() {
            let restocked = sqlx::query(
                r#"
                UPDATE products p
                SET stock = p.stock + oi.quantity, updated_at = current_timestamp
                FROM order_items oi
                WHERE oi.order_id = $1 AND oi.product_id = p.product_id
                "#,
            )
            .bind(order_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

            info!(
                "📦 Restocked {} product(s) from order {}",
                restocked.rows_affected(),
                order.order_number
            );
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("🔄 Order {} is now {}", order.order_number, order.status);
        Ok(Some(order))
    }

    async fn submit_payment(
        &self,
        order_id: i32,
        user_id: i32,
        reference: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET payment_reference = $3,
                payment_submitted_at = current_timestamp,
                updated_at = current_timestamp
            WHERE order_id = $1
              AND user_id = $2
              AND status = 'pending'
              AND payment_method = 'bank_transfer'
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(user_id)
        .bind(reference)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to record payment for order {order_id}: {e:?}");
            RepositoryError::from(e)
        })
    }
}
