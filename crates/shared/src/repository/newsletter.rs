use crate::{
    abstract_trait::NewsletterRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllNewsletters, page_window, search_pattern},
    errors::RepositoryError,
    model::Newsletter,
    repository::fetch_counted,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct NewsletterRepository {
    db: ConnectionPool,
}

impl NewsletterRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NewsletterRepositoryTrait for NewsletterRepository {
    async fn find_all(
        &self,
        req: &FindAllNewsletters,
    ) -> Result<(Vec<Newsletter>, i64), RepositoryError> {
        let (limit, offset) = page_window(req.page, req.page_size);

        let search = search_pattern(&req.search);
        let db = &self.db;

        fetch_counted(limit, offset, move |limit, offset| {
            sqlx::query(
                r#"
                SELECT newsletter_id, email, created_at, COUNT(*) OVER() AS total_count
                FROM newsletters
                WHERE ($1::TEXT IS NULL OR email ILIKE '%' || $1 || '%')
                ORDER BY created_at DESC, newsletter_id DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(search.clone())
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
        })
        .await
        .inspect_err(|e| error!("❌ Failed to fetch newsletter subscribers: {e:?}"))
    }

    async fn create(&self, email: &str) -> Result<Newsletter, RepositoryError> {
        let row = sqlx::query_as::<_, Newsletter>(
            "INSERT INTO newsletters (email) VALUES ($1) RETURNING *",
        )
        .bind(email)
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)?;

        info!("📰 New newsletter subscriber ID {}", row.newsletter_id);
        Ok(row)
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM newsletters WHERE email = $1")
            .bind(email)
            .execute(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM newsletters WHERE newsletter_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
