use crate::{
    abstract_trait::{
        DoctorAdminServiceTrait, DynEmailService, DynSessionStore, DynUserCommandRepository,
        DynUserQueryRepository,
    },
    domain::{
        notifications::Notifications,
        requests::FindAllUsers,
        responses::{ApiResponse, ApiResponsePagination, Pagination, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    service::email::send_quietly,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct DoctorAdminService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    sessions: DynSessionStore,
    email: DynEmailService,
    notifications: Notifications,
    tracer: ServiceTracer,
}

pub struct DoctorAdminServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub sessions: DynSessionStore,
    pub email: DynEmailService,
    pub notifications: Notifications,
    pub registry: Arc<Mutex<Registry>>,
}

impl DoctorAdminService {
    pub async fn new(deps: DoctorAdminServiceDeps) -> Self {
        let DoctorAdminServiceDeps {
            query,
            command,
            sessions,
            email,
            notifications,
            registry,
        } = deps;

        Self {
            query,
            command,
            sessions,
            email,
            notifications,
            tracer: ServiceTracer::new("doctor_admin_service", registry).await,
        }
    }

    fn attributes(id: i32) -> Vec<KeyValue> {
        vec![
            KeyValue::new("component", "doctor_admin"),
            KeyValue::new("user.id", id.to_string()),
        ]
    }
}

#[async_trait]
impl DoctorAdminServiceTrait for DoctorAdminService {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        info!(
            "🔍 Listing doctors (page={}, size={}, approved={:?})",
            req.page, req.page_size, req.approved
        );

        let tracing_ctx = self.tracer.start(
            "FindAllDoctors",
            vec![KeyValue::new("component", "doctor_admin")],
        );

        let result = self
            .query
            .find_all(req)
            .await
            .map(|(users, total)| {
                ApiResponsePagination::success(
                    "Doctors retrieved",
                    users.into_iter().map(UserResponse::from).collect(),
                    Pagination::new(req.page, req.page_size, total),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Doctors retrieved")
            .await
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start("FindDoctor", Self::attributes(id));

        let result = match self.query.find_by_id(id).await {
            Ok(Some(user)) => Ok(ApiResponse::success(
                "Doctor retrieved",
                UserResponse::from(user),
            )),
            Ok(None) => Err(ServiceError::not_found("Doctor")),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Doctor retrieved")
            .await
    }

    async fn approve(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start("ApproveDoctor", Self::attributes(id));

        let result = match self.command.set_approval(id, true).await {
            Ok(user) => {
                info!("✅ Approved doctor {} ({})", user.user_id, user.email);
                send_quietly(&self.email, self.notifications.doctor_approved(&user)).await;
                Ok(ApiResponse::success(
                    "Doctor approved",
                    UserResponse::from(user),
                ))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Patch, result, "Doctor approved")
            .await
    }

    async fn revoke(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start("RevokeDoctor", Self::attributes(id));

        let result = match self.command.set_approval(id, false).await {
            Ok(user) => {
                let ended = self.sessions.delete_user_sessions(id).await;
                info!(
                    "⛔ Revoked approval of doctor {} and ended {ended} session(s)",
                    user.user_id
                );
                Ok(ApiResponse::success(
                    "Doctor approval revoked",
                    UserResponse::from(user),
                ))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Patch, result, "Doctor approval revoked")
            .await
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self.tracer.start("DeleteDoctor", Self::attributes(id));

        let result = match self.command.delete_user(id).await {
            Ok(()) => {
                self.sessions.delete_user_sessions(id).await;
                Ok(ApiResponse::success("Doctor deleted", ()))
            }
            Err(RepositoryError::ForeignKey(_)) => {
                warn!("⚠️ Doctor {id} has orders and cannot be deleted");
                Err(ServiceError::Conflict(
                    "Doctor has order history; revoke approval instead".to_string(),
                ))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Delete, result, "Doctor deleted")
            .await
    }
}
