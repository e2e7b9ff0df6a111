use crate::{
    abstract_trait::UserQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllUsers, page_window, search_pattern},
    errors::RepositoryError,
    model::User as UserModel,
    repository::fetch_counted,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<UserModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching doctors (page={}, size={}, approved={:?})",
            req.page, req.page_size, req.approved
        );

        let (limit, offset) = page_window(req.page, req.page_size);

        let search = search_pattern(&req.search);
        let db = &self.db;

        fetch_counted(limit, offset, move |limit, offset| {
            sqlx::query(
                r#"
                SELECT u.*, COUNT(*) OVER() AS total_count
                FROM users u
                WHERE ($1::TEXT IS NULL
                       OR u.email ILIKE '%' || $1 || '%'
                       OR u.first_name ILIKE '%' || $1 || '%'
                       OR u.last_name ILIKE '%' || $1 || '%'
                       OR u.license_number ILIKE '%' || $1 || '%'
                       OR u.clinic_name ILIKE '%' || $1 || '%')
                  AND ($2::BOOLEAN IS NULL OR u.is_approved = $2)
                ORDER BY u.created_at DESC, u.user_id DESC
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(search.clone())
            .bind(req.approved)
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
        })
        .await
        .inspect_err(|e| error!("❌ Failed to fetch doctors: {e:?}"))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch user {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch user by email: {e:?}");
                RepositoryError::from(e)
            })
    }
}
