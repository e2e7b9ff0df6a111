use crate::{
    domain::{
        requests::{CreateDoctorRecord, FindAllUsers, UpdateProfileRequest},
        responses::{ApiResponse, ApiResponsePagination, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::User as UserModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;
pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;
pub type DynDoctorAdminService = Arc<dyn DoctorAdminServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryRepositoryTrait {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<UserModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError>;
}

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create_doctor(&self, req: &CreateDoctorRecord) -> Result<UserModel, RepositoryError>;
    async fn update_profile(
        &self,
        id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<UserModel, RepositoryError>;
    async fn set_approval(&self, id: i32, approved: bool) -> Result<UserModel, RepositoryError>;
    async fn delete_user(&self, id: i32) -> Result<(), RepositoryError>;
}

/// Admin-side management of doctor accounts.
#[async_trait]
pub trait DoctorAdminServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn approve(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn revoke(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
