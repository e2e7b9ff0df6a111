use crate::{errors::RepositoryError, model::AdminUser};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAdminRepository = Arc<dyn AdminRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait AdminRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<AdminUser>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<AdminUser>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError>;
    async fn create_admin(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError>;
}
