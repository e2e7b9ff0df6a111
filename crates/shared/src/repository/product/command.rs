use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        product: &CreateProductRequest,
        slug: &str,
    ) -> Result<ProductModel, RepositoryError> {
        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (
                name, slug, description, sku, price, stock, image_url,
                category_id, brand_id, is_featured, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&product.name)
        .bind(slug)
        .bind(&product.description)
        .bind(&product.sku)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.image_url)
        .bind(product.category_id)
        .bind(product.brand_id)
        .bind(product.is_featured)
        .bind(product.is_active)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created product ID {} ({})",
            result.product_id, result.name
        );
        Ok(result)
    }

    async fn update_product(
        &self,
        product: &UpdateProductRequest,
        slug: &str,
    ) -> Result<ProductModel, RepositoryError> {
        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = $2,
                slug = $3,
                description = $4,
                sku = $5,
                price = $6,
                stock = $7,
                image_url = $8,
                category_id = $9,
                brand_id = $10,
                is_featured = $11,
                is_active = $12,
                updated_at = current_timestamp
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(slug)
        .bind(&product.description)
        .bind(&product.sku)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.image_url)
        .bind(product.category_id)
        .bind(product.brand_id)
        .bind(product.is_featured)
        .bind(product.is_active)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", product.id, err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated product ID {}", result.product_id);
        Ok(result)
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete product ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Permanently deleted product ID {id}");
        Ok(())
    }
}
