use crate::{
    abstract_trait::AdminRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::AdminUser,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct AdminRepository {
    db: ConnectionPool,
}

impl AdminRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepositoryTrait for AdminRepository {
    async fn find_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users ORDER BY admin_id")
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to list admins: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<AdminUser>, RepositoryError> {
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE admin_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError> {
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch admin {username}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn create_admin(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError> {
        let admin = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create admin {username}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("✅ Created admin ID {} ({})", admin.admin_id, admin.username);
        Ok(admin)
    }
}
