use crate::{
    abstract_trait::{AdminAuthServiceTrait, DynAdminRepository, DynHashing, DynSessionStore},
    config::AdminFallbackConfig,
    domain::{
        requests::{AdminLoginRequest, CreateAdminRequest},
        responses::{AdminResponse, ApiResponse},
        session::{AuthenticatedSession, Principal, Session},
    },
    errors::ServiceError,
    utils::{Method, ServiceTracer, constant_time_eq},
};
use async_trait::async_trait;
use chrono::Duration;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::open_session;

/// Id carried by sessions opened with the fallback credentials.
pub const FALLBACK_ADMIN_ID: i32 = 0;

pub struct AdminAuthService {
    repository: DynAdminRepository,
    hash: DynHashing,
    sessions: DynSessionStore,
    fallback: AdminFallbackConfig,
    session_ttl: Duration,
    tracer: ServiceTracer,
}

pub struct AdminAuthServiceDeps {
    pub repository: DynAdminRepository,
    pub hash: DynHashing,
    pub sessions: DynSessionStore,
    pub fallback: AdminFallbackConfig,
    pub session_ttl: Duration,
    pub registry: Arc<Mutex<Registry>>,
}

impl AdminAuthService {
    pub async fn new(deps: AdminAuthServiceDeps) -> Self {
        let AdminAuthServiceDeps {
            repository,
            hash,
            sessions,
            fallback,
            session_ttl,
            registry,
        } = deps;

        Self {
            repository,
            hash,
            sessions,
            fallback,
            session_ttl,
            tracer: ServiceTracer::new("admin_auth_service", registry).await,
        }
    }

    async fn authenticate(&self, req: &AdminLoginRequest) -> Result<Principal, ServiceError> {
        let username = req.username.trim();

        if let Some(admin) = self.repository.find_by_username(username).await? {
            match self.hash.compare_password(&admin.password, &req.password).await {
                Ok(()) => {
                    return Ok(Principal::Admin {
                        admin_id: admin.admin_id,
                        username: admin.username,
                    });
                }
                Err(ServiceError::Internal(msg)) => return Err(ServiceError::Internal(msg)),
                Err(_) => warn!("⚠️ Wrong password for admin {username}"),
            }
        }

        match self.fallback.credentials() {
            Some((user, pass))
                if constant_time_eq(user.as_bytes(), username.as_bytes())
                    & constant_time_eq(pass.as_bytes(), req.password.as_bytes()) =>
            {
                warn!("🔑 Admin login through fallback credentials for {username}");
                Ok(Principal::Admin {
                    admin_id: FALLBACK_ADMIN_ID,
                    username: username.to_string(),
                })
            }
            _ => Err(ServiceError::InvalidCredentials),
        }
    }
}

#[async_trait]
impl AdminAuthServiceTrait for AdminAuthService {
    async fn login(
        &self,
        req: &AdminLoginRequest,
    ) -> Result<AuthenticatedSession<ApiResponse<AdminResponse>>, ServiceError> {
        info!("🔐 Admin login attempt: {}", req.username);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "AdminLogin",
            vec![
                KeyValue::new("component", "admin_auth"),
                KeyValue::new("admin.username", req.username.clone()),
            ],
        );

        let principal = match self.authenticate(req).await {
            Ok(principal) => principal,
            Err(e) => {
                self.tracer
                    .failure(&tracing_ctx, method, "Admin authentication failed")
                    .await;
                return Err(e);
            }
        };

        let session = match open_session(principal) {
            Ok(session) => session,
            Err(e) => {
                self.tracer
                    .failure(&tracing_ctx, method, "Failed to open session")
                    .await;
                return Err(e);
            }
        };

        if let Err(e) = self.sessions.create_session(&session, self.session_ttl).await {
            error!("❌ Failed to store admin session: {e}");
            self.tracer
                .failure(&tracing_ctx, method, "Failed to store session")
                .await;
            return Err(e);
        }

        let response = match self.me(&session).await {
            Ok(response) => response,
            Err(e) => {
                self.tracer
                    .failure(&tracing_ctx, method, "Failed to load admin")
                    .await;
                return Err(e);
            }
        };

        self.tracer
            .success(&tracing_ctx, method, "Admin login successful")
            .await;

        Ok(AuthenticatedSession {
            session,
            ttl_seconds: self.session_ttl.num_seconds(),
            response: ApiResponse::success("Login successful", response.data),
        })
    }

    async fn logout(&self, session_id: &str) -> Result<ApiResponse<()>, ServiceError> {
        self.sessions.delete_session(session_id).await;
        info!("👋 Admin logged out");
        Ok(ApiResponse::success("Logged out", ()))
    }

    async fn me(&self, session: &Session) -> Result<ApiResponse<AdminResponse>, ServiceError> {
        let Principal::Admin { admin_id, username } = &session.principal else {
            return Err(ServiceError::Forbidden("Admin access required".into()));
        };

        if *admin_id == FALLBACK_ADMIN_ID {
            return Ok(ApiResponse::success(
                "Admin retrieved",
                AdminResponse {
                    id: FALLBACK_ADMIN_ID,
                    username: username.clone(),
                    email: None,
                    created_at: None,
                },
            ));
        }

        match self.repository.find_by_id(*admin_id).await? {
            Some(admin) => Ok(ApiResponse::success(
                "Admin retrieved",
                AdminResponse::from(admin),
            )),
            None => Err(ServiceError::not_found("Admin")),
        }
    }

    async fn create_admin(
        &self,
        req: &CreateAdminRequest,
    ) -> Result<ApiResponse<AdminResponse>, ServiceError> {
        let username = req.username.trim();
        let tracing_ctx = self.tracer.start(
            "CreateAdmin",
            vec![
                KeyValue::new("component", "admin_auth"),
                KeyValue::new("admin.username", username.to_string()),
            ],
        );

        let result = async {
            if self.repository.find_by_username(username).await?.is_some() {
                return Err(ServiceError::Conflict(format!(
                    "Admin '{username}' already exists"
                )));
            }

            let password_hash = self.hash.hash_password(&req.password).await?;
            let email = req.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
            let admin = self
                .repository
                .create_admin(username, email, &password_hash)
                .await?;

            info!("👤 Created admin {} (ID {})", admin.username, admin.admin_id);
            Ok(ApiResponse::success(
                "Admin created",
                AdminResponse::from(admin),
            ))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Post, result, "Admin created")
            .await
    }

    async fn list_admins(&self) -> Result<ApiResponse<Vec<AdminResponse>>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("ListAdmins", vec![KeyValue::new("component", "admin_auth")]);

        let result = self
            .repository
            .find_all()
            .await
            .map(|admins| {
                ApiResponse::success(
                    "Admins retrieved",
                    admins.into_iter().map(AdminResponse::from).collect(),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Admins retrieved")
            .await
    }
}
