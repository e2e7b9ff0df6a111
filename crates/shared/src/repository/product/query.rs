use crate::{
    abstract_trait::ProductQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllProducts, page_window, search_pattern},
    errors::RepositoryError,
    model::Product as ProductModel,
    repository::fetch_counted,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllProducts,
        active_only: bool,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching products (page={}, size={}, search={:?}, active_only={})",
            req.page, req.page_size, req.search, active_only
        );

        let (limit, offset) = page_window(req.page, req.page_size);

        let sql = format!(
            r#"
            SELECT p.*, COUNT(*) OVER() AS total_count
            FROM products p
            WHERE ($1::TEXT IS NULL
                   OR p.name ILIKE '%' || $1 || '%'
                   OR p.sku ILIKE '%' || $1 || '%'
                   OR p.description ILIKE '%' || $1 || '%')
              AND ($2::INT IS NULL OR p.category_id = $2)
              AND ($3::INT IS NULL OR p.brand_id = $3)
              AND ($4::BIGINT IS NULL OR p.price >= $4)
              AND ($5::BIGINT IS NULL OR p.price <= $5)
              AND ($6::BOOLEAN IS NULL OR p.is_featured = $6)
              AND (NOT $7 OR p.is_active)
            ORDER BY {}
            LIMIT $8 OFFSET $9
            "#,
            req.sort.order_by()
        );

        let search = search_pattern(&req.search);
        let db = &self.db;
        let sql = sql.as_str();

        fetch_counted(limit, offset, move |limit, offset| {
            sqlx::query(sql)
                .bind(search.clone())
                .bind(req.category_id)
                .bind(req.brand_id)
                .bind(req.min_price)
                .bind(req.max_price)
                .bind(req.featured)
                .bind(active_only)
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
        })
        .await
        .inspect_err(|e| error!("❌ Failed to fetch products: {e:?}"))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        sqlx::query_as::<_, ProductModel>("SELECT * FROM products WHERE product_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProductModel>, RepositoryError> {
        sqlx::query_as::<_, ProductModel>("SELECT * FROM products WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product by slug {slug}: {e:?}");
                RepositoryError::from(e)
            })
    }
}
