use crate::{
    abstract_trait::CartRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{CartItem, CartLine},
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct CartRepository {
    db: ConnectionPool,
}

impl CartRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepositoryTrait for CartRepository {
    async fn find_lines(&self, user_id: i32) -> Result<Vec<CartLine>, RepositoryError> {
        sqlx::query_as::<_, CartLine>(
            r#"
            SELECT c.cart_item_id, c.product_id, c.quantity,
                   p.name, p.slug, p.price, p.stock, p.image_url, p.is_active
            FROM cart_items c
            JOIN products p ON p.product_id = c.product_id
            WHERE c.user_id = $1
            ORDER BY c.created_at ASC, c.cart_item_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load cart of user {user_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_item(
        &self,
        user_id: i32,
        cart_item_id: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        sqlx::query_as::<_, CartItem>(
            "SELECT * FROM cart_items WHERE cart_item_id = $1 AND user_id = $2",
        )
        .bind(cart_item_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_by_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        sqlx::query_as::<_, CartItem>(
            "SELECT * FROM cart_items WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn upsert_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                          updated_at = current_timestamp
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to add product {product_id} to cart of user {user_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!(
            "🛒 Cart item {} now holds {} x product {}",
            item.cart_item_id, item.quantity, item.product_id
        );
        Ok(item)
    }

    async fn update_quantity(
        &self,
        user_id: i32,
        cart_item_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $3, updated_at = current_timestamp
            WHERE cart_item_id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(cart_item_id)
        .bind(user_id)
        .bind(quantity)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update cart item {cart_item_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn remove_item(&self, user_id: i32, cart_item_id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_item_id = $1 AND user_id = $2")
            .bind(cart_item_id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, user_id: i32) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        Ok(result.rows_affected())
    }
}
