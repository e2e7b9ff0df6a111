use crate::{
    abstract_trait::{
        DynEmailService, DynReferralRepository, DynUserQueryRepository, ReferralServiceTrait,
    },
    domain::{
        notifications::Notifications,
        requests::{CreateReferralRequest, FindAllReferrals},
        responses::{ApiResponse, ApiResponsePagination, Pagination, ReferralResponse},
    },
    errors::ServiceError,
    service::email::send_quietly,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

pub struct ReferralServiceDeps {
    pub repository: DynReferralRepository,
    pub users: DynUserQueryRepository,
    pub email: DynEmailService,
    pub notifications: Notifications,
    pub registry: Arc<Mutex<Registry>>,
}

pub struct ReferralService {
    repository: DynReferralRepository,
    users: DynUserQueryRepository,
    email: DynEmailService,
    notifications: Notifications,
    tracer: ServiceTracer,
}

impl ReferralService {
    pub async fn new(deps: ReferralServiceDeps) -> Self {
        Self {
            repository: deps.repository,
            users: deps.users,
            email: deps.email,
            notifications: deps.notifications,
            tracer: ServiceTracer::new("referral_service", deps.registry).await,
        }
    }

    async fn list(
        &self,
        referrer_id: Option<i32>,
        req: &FindAllReferrals,
    ) -> Result<ApiResponsePagination<Vec<ReferralResponse>>, ServiceError> {
        let (rows, total) = self.repository.find_all(referrer_id, req).await?;

        Ok(ApiResponsePagination::success(
            "Referrals retrieved",
            rows.into_iter().map(ReferralResponse::from).collect(),
            Pagination::new(req.page, req.page_size, total),
        ))
    }
}

#[async_trait]
impl ReferralServiceTrait for ReferralService {
    async fn create(
        &self,
        referrer_id: i32,
        req: &CreateReferralRequest,
    ) -> Result<ApiResponse<ReferralResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "CreateReferral",
            vec![
                KeyValue::new("component", "referral"),
                KeyValue::new("user.id", referrer_id.to_string()),
            ],
        );

        let result = async {
            let referred_email = req.referred_email.trim().to_lowercase();
            if self.users.find_by_email(&referred_email).await?.is_some() {
                warn!("⚠️ Referral target {referred_email} is already a member");
                return Err(ServiceError::Conflict(
                    "This doctor already has an account".into(),
                ));
            }

            let referrer = self
                .users
                .find_by_id(referrer_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User"))?;

            let referral = self.repository.create(referrer_id, req).await?;
            send_quietly(
                &self.email,
                self.notifications.referral_invite(&referrer, &referral),
            )
            .await;

            Ok(ApiResponse::success(
                "Invitation sent",
                ReferralResponse::from(referral),
            ))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Post, result, "Referral created")
            .await
    }

    async fn find_mine(
        &self,
        referrer_id: i32,
        req: &FindAllReferrals,
    ) -> Result<ApiResponsePagination<Vec<ReferralResponse>>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "FindMyReferrals",
            vec![
                KeyValue::new("component", "referral"),
                KeyValue::new("user.id", referrer_id.to_string()),
            ],
        );

        let result = self.list(Some(referrer_id), req).await;

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Referrals retrieved")
            .await
    }

    async fn find_all(
        &self,
        req: &FindAllReferrals,
    ) -> Result<ApiResponsePagination<Vec<ReferralResponse>>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("FindAllReferrals", vec![KeyValue::new("component", "referral")]);

        let result = self.list(None, req).await;

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Referrals retrieved")
            .await
    }
}
