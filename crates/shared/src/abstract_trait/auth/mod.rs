use crate::{
    domain::{
        requests::{
            AdminLoginRequest, CreateAdminRequest, LoginRequest, RegisterDoctorRequest,
            UpdateProfileRequest,
        },
        responses::{AdminResponse, ApiResponse, UserResponse},
        session::{AuthenticatedSession, Session},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;
pub type DynAdminAuthService = Arc<dyn AdminAuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn register(
        &self,
        req: &RegisterDoctorRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn login(
        &self,
        req: &LoginRequest,
    ) -> Result<AuthenticatedSession<ApiResponse<UserResponse>>, ServiceError>;
    async fn logout(&self, session_id: &str) -> Result<ApiResponse<()>, ServiceError>;
    async fn me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
}

#[async_trait]
pub trait AdminAuthServiceTrait {
    async fn login(
        &self,
        req: &AdminLoginRequest,
    ) -> Result<AuthenticatedSession<ApiResponse<AdminResponse>>, ServiceError>;
    async fn logout(&self, session_id: &str) -> Result<ApiResponse<()>, ServiceError>;
    async fn me(&self, session: &Session) -> Result<ApiResponse<AdminResponse>, ServiceError>;
    async fn create_admin(
        &self,
        req: &CreateAdminRequest,
    ) -> Result<ApiResponse<AdminResponse>, ServiceError>;
    async fn list_admins(&self) -> Result<ApiResponse<Vec<AdminResponse>>, ServiceError>;
}
