use crate::{
    abstract_trait::TaxonomyRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateTaxonomyRequest, UpdateTaxonomyRequest},
    errors::RepositoryError,
    model::{Taxonomy as TaxonomyModel, TaxonomyKind},
};
use async_trait::async_trait;
use tracing::{error, info};

const COLUMNS: &str = "name, slug, description, image_url, created_at, updated_at";

/// Categories and brands share one shape; `kind` picks the table.
pub struct TaxonomyRepository {
    db: ConnectionPool,
    kind: TaxonomyKind,
}

impl TaxonomyRepository {
    pub fn new(db: ConnectionPool, kind: TaxonomyKind) -> Self {
        Self { db, kind }
    }

    fn select(&self) -> String {
        format!(
            "SELECT {} AS id, {COLUMNS} FROM {}",
            self.kind.id_column(),
            self.kind.table()
        )
    }

    fn returning(&self) -> String {
        format!("RETURNING {} AS id, {COLUMNS}", self.kind.id_column())
    }
}

#[async_trait]
impl TaxonomyRepositoryTrait for TaxonomyRepository {
    async fn find_all(&self) -> Result<Vec<TaxonomyModel>, RepositoryError> {
        let sql = format!("{} ORDER BY name ASC", self.select());

        sqlx::query_as::<_, TaxonomyModel>(&sql)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch {}: {e:?}", self.kind.table());
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TaxonomyModel>, RepositoryError> {
        let sql = format!("{} WHERE {} = $1", self.select(), self.kind.id_column());

        sqlx::query_as::<_, TaxonomyModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn create(
        &self,
        req: &CreateTaxonomyRequest,
        slug: &str,
    ) -> Result<TaxonomyModel, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO {} (name, slug, description, image_url)
            VALUES ($1, $2, $3, $4)
            {}
            "#,
            self.kind.table(),
            self.returning()
        );

        let row = sqlx::query_as::<_, TaxonomyModel>(&sql)
            .bind(&req.name)
            .bind(slug)
            .bind(&req.description)
            .bind(&req.image_url)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to create {} {}: {e:?}", self.kind.name(), req.name);
                RepositoryError::from(e)
            })?;

        info!("🏷️ Created {} ID {} ({})", self.kind.name(), row.id, row.name);
        Ok(row)
    }

    async fn update(
        &self,
        req: &UpdateTaxonomyRequest,
        slug: &str,
    ) -> Result<TaxonomyModel, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET name = $2,
                slug = $3,
                description = $4,
                image_url = COALESCE($5, image_url),
                updated_at = current_timestamp
            WHERE {} = $1
            {}
            "#,
            self.kind.table(),
            self.kind.id_column(),
            self.returning()
        );

        let row = sqlx::query_as::<_, TaxonomyModel>(&sql)
            .bind(req.id)
            .bind(&req.name)
            .bind(slug)
            .bind(&req.description)
            .bind(&req.image_url)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to update {} {}: {e:?}", self.kind.name(), req.id);
                RepositoryError::from(e)
            })?;

        info!("🔄 Updated {} ID {}", self.kind.name(), row.id);
        Ok(row)
    }

    async fn update_image(&self, id: i32, image_url: &str) -> Result<TaxonomyModel, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET image_url = $2, updated_at = current_timestamp
            WHERE {} = $1
            {}
            "#,
            self.kind.table(),
            self.kind.id_column(),
            self.returning()
        );

        sqlx::query_as::<_, TaxonomyModel>(&sql)
            .bind(id)
            .bind(image_url)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to update image of {} {id}: {e:?}", self.kind.name());
                RepositoryError::from(e)
            })
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = $1",
            self.kind.table(),
            self.kind.id_column()
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete {} {id}: {e:?}", self.kind.name());
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted {} ID {id}", self.kind.name());
        Ok(())
    }
}
