use crate::{
    abstract_trait::{CarouselRepositoryTrait, FeaturedRepositoryTrait},
    config::ConnectionPool,
    domain::requests::{
        CarouselPosition, CreateCarouselItemRequest, CreateFeaturedRequest,
        UpdateCarouselItemRequest, UpdateFeaturedRequest,
    },
    errors::RepositoryError,
    model::{CarouselItem, FeaturedCarousel, FeaturedProduct},
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct CarouselRepository {
    db: ConnectionPool,
}

impl CarouselRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CarouselRepositoryTrait for CarouselRepository {
    async fn find_all(&self, active_only: bool) -> Result<Vec<CarouselItem>, RepositoryError> {
        sqlx::query_as::<_, CarouselItem>(
            r#"
            SELECT * FROM carousel_items
            WHERE (NOT $1 OR is_active)
            ORDER BY display_order ASC, carousel_item_id ASC
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch carousel items: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CarouselItem>, RepositoryError> {
        sqlx::query_as::<_, CarouselItem>(
            "SELECT * FROM carousel_items WHERE carousel_item_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn create(
        &self,
        req: &CreateCarouselItemRequest,
    ) -> Result<CarouselItem, RepositoryError> {
        let item = sqlx::query_as::<_, CarouselItem>(
            r#"
            INSERT INTO carousel_items (
                title, subtitle, image_url, link_url, button_text,
                background_color, text_color, display_order, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.subtitle)
        .bind(&req.image_url)
        .bind(&req.link_url)
        .bind(&req.button_text)
        .bind(&req.background_color)
        .bind(&req.text_color)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create carousel item {}: {e:?}", req.title);
            RepositoryError::from(e)
        })?;

        info!("🖼️ Created carousel item ID {}", item.carousel_item_id);
        Ok(item)
    }

    async fn update(
        &self,
        req: &UpdateCarouselItemRequest,
    ) -> Result<CarouselItem, RepositoryError> {
        sqlx::query_as::<_, CarouselItem>(
            r#"
            UPDATE carousel_items
            SET title = $2,
                subtitle = $3,
                image_url = $4,
                link_url = $5,
                button_text = $6,
                background_color = $7,
                text_color = $8,
                display_order = $9,
                is_active = $10,
                updated_at = current_timestamp
            WHERE carousel_item_id = $1
            RETURNING *
            "#,
        )
        .bind(req.id)
        .bind(&req.title)
        .bind(&req.subtitle)
        .bind(&req.image_url)
        .bind(&req.link_url)
        .bind(&req.button_text)
        .bind(&req.background_color)
        .bind(&req.text_color)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update carousel item {}: {e:?}", req.id);
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM carousel_items WHERE carousel_item_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted carousel item ID {id}");
        Ok(())
    }

    async fn reorder(&self, positions: &[CarouselPosition]) -> Result<(), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        for position in positions {
            let result = sqlx::query(
                r#"
                UPDATE carousel_items
                SET display_order = $2, updated_at = current_timestamp
                WHERE carousel_item_id = $1
                "#,
            )
            .bind(position.id)
            .bind(position.display_order)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

            if result.rows_affected() == 0 {
                error!("❌ Carousel item {} does not exist, reorder aborted", position.id);
                return Err(RepositoryError::NotFound);
            }
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("🔀 Reordered {} carousel item(s)", positions.len());
        Ok(())
    }
}

pub struct FeaturedRepository {
    db: ConnectionPool,
}

impl FeaturedRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeaturedRepositoryTrait for FeaturedRepository {
    async fn find_all(&self, active_only: bool) -> Result<Vec<FeaturedProduct>, RepositoryError> {
        sqlx::query_as::<_, FeaturedProduct>(
            r#"
            SELECT p.*, f.featured_id, f.display_order, f.is_active AS featured_active
            FROM featured_carousel f
            JOIN products p ON p.product_id = f.product_id
            WHERE (NOT $1 OR (f.is_active AND p.is_active))
            ORDER BY f.display_order ASC, f.featured_id ASC
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch featured products: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<FeaturedProduct>, RepositoryError> {
        sqlx::query_as::<_, FeaturedProduct>(
            r#"
            SELECT p.*, f.featured_id, f.display_order, f.is_active AS featured_active
            FROM featured_carousel f
            JOIN products p ON p.product_id = f.product_id
            WHERE f.featured_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn create(
        &self,
        req: &CreateFeaturedRequest,
    ) -> Result<FeaturedCarousel, RepositoryError> {
        let row = sqlx::query_as::<_, FeaturedCarousel>(
            r#"
            INSERT INTO featured_carousel (product_id, display_order)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(req.product_id)
        .bind(req.display_order)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to feature product {}: {e:?}", req.product_id);
            RepositoryError::from(e)
        })?;

        info!("⭐ Featured product {} as ID {}", row.product_id, row.featured_id);
        Ok(row)
    }

    async fn update(
        &self,
        req: &UpdateFeaturedRequest,
    ) -> Result<FeaturedCarousel, RepositoryError> {
        sqlx::query_as::<_, FeaturedCarousel>(
            r#"
            UPDATE featured_carousel
            SET display_order = $2, is_active = $3
            WHERE featured_id = $1
            RETURNING *
            "#,
        )
        .bind(req.id)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update featured entry {}: {e:?}", req.id);
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM featured_carousel WHERE featured_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Removed featured entry ID {id}");
        Ok(())
    }
}
