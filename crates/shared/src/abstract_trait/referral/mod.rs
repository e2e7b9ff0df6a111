use crate::{
    domain::{
        requests::{CreateReferralRequest, FindAllReferrals},
        responses::{ApiResponse, ApiResponsePagination, ReferralResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Referral,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynReferralRepository = Arc<dyn ReferralRepositoryTrait + Send + Sync>;
pub type DynReferralService = Arc<dyn ReferralServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReferralRepositoryTrait {
    async fn create(
        &self,
        referrer_id: i32,
        req: &CreateReferralRequest,
    ) -> Result<Referral, RepositoryError>;
    /// `referrer_id = None` lists every referral.
    async fn find_all(
        &self,
        referrer_id: Option<i32>,
        req: &FindAllReferrals,
    ) -> Result<(Vec<Referral>, i64), RepositoryError>;
}

#[async_trait]
pub trait ReferralServiceTrait {
    async fn create(
        &self,
        referrer_id: i32,
        req: &CreateReferralRequest,
    ) -> Result<ApiResponse<ReferralResponse>, ServiceError>;
    async fn find_mine(
        &self,
        referrer_id: i32,
        req: &FindAllReferrals,
    ) -> Result<ApiResponsePagination<Vec<ReferralResponse>>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllReferrals,
    ) -> Result<ApiResponsePagination<Vec<ReferralResponse>>, ServiceError>;
}
