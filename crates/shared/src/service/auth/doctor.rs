use crate::{
    abstract_trait::{
        AuthServiceTrait, DynEmailService, DynHashing, DynSessionStore, DynUserCommandRepository,
        DynUserQueryRepository,
    },
    domain::{
        notifications::Notifications,
        requests::{CreateDoctorRecord, LoginRequest, RegisterDoctorRequest, UpdateProfileRequest},
        responses::{ApiResponse, UserResponse},
        session::{AuthenticatedSession, Principal},
    },
    errors::ServiceError,
    service::email::{send_optional, send_quietly},
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use chrono::Duration;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::{normalize_email, open_session};

pub struct AuthService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hash: DynHashing,
    sessions: DynSessionStore,
    email: DynEmailService,
    notifications: Notifications,
    session_ttl: Duration,
    tracer: ServiceTracer,
}

pub struct AuthServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hash: DynHashing,
    pub sessions: DynSessionStore,
    pub email: DynEmailService,
    pub notifications: Notifications,
    pub session_ttl: Duration,
    pub registry: Arc<Mutex<Registry>>,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps) -> Self {
        let AuthServiceDeps {
            query,
            command,
            hash,
            sessions,
            email,
            notifications,
            session_ttl,
            registry,
        } = deps;

        Self {
            query,
            command,
            hash,
            sessions,
            email,
            notifications,
            session_ttl,
            tracer: ServiceTracer::new("auth_service", registry).await,
        }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register(
        &self,
        req: &RegisterDoctorRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let email = normalize_email(&req.email);
        info!("📝 Registering doctor: {email}");

        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "RegisterDoctor",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", email.clone()),
            ],
        );

        match self.query.find_by_email(&email).await {
            Ok(Some(_)) => {
                warn!("⚠️ Email already registered: {email}");
                self.tracer
                    .failure(&tracing_ctx, method, "Email already registered")
                    .await;
                return Err(ServiceError::Conflict(
                    "An account with this email already exists".into(),
                ));
            }
            Ok(None) => {}
            Err(e) => {
                error!("❌ Failed to look up email {email}: {e:?}");
                self.tracer
                    .failure(&tracing_ctx, method, "Database error")
                    .await;
                return Err(ServiceError::Repo(e));
            }
        }

        let password_hash = match self.hash.hash_password(&req.password).await {
            Ok(hash) => hash,
            Err(e) => {
                error!("❌ Failed to hash password: {e}");
                self.tracer
                    .failure(&tracing_ctx, method, "Failed to hash password")
                    .await;
                return Err(e);
            }
        };

        let record = CreateDoctorRecord {
            email: email.clone(),
            password_hash,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            phone: req.phone.clone(),
            license_number: req.license_number.trim().to_string(),
            specialty: req.specialty.clone(),
            clinic_name: req.clinic_name.clone(),
            address: req.address.clone(),
        };

        let user = match self.command.create_doctor(&record).await {
            Ok(user) => user,
            Err(e) => {
                error!("❌ Failed to create doctor {email}: {e:?}");
                self.tracer
                    .failure(&tracing_ctx, method, "Failed to create doctor")
                    .await;
                return Err(ServiceError::Repo(e));
            }
        };

        send_quietly(&self.email, self.notifications.registration_received(&user)).await;
        send_optional(&self.email, self.notifications.doctor_awaiting_approval(&user)).await;

        self.tracer
            .success(&tracing_ctx, method, "Doctor registered")
            .await;

        Ok(ApiResponse::success(
            "Registration received. Your account will be reviewed by an administrator.",
            UserResponse::from(user),
        ))
    }

    async fn login(
        &self,
        req: &LoginRequest,
    ) -> Result<AuthenticatedSession<ApiResponse<UserResponse>>, ServiceError> {
        let email = normalize_email(&req.email);
        info!("🔐 Attempting login for email: {email}");

        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "Login",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", email.clone()),
            ],
        );

        let user = match self.query.find_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("⚠️ Login for unknown email: {email}");
                self.tracer
                    .failure(&tracing_ctx, method, "Unknown email")
                    .await;
                return Err(ServiceError::InvalidCredentials);
            }
            Err(e) => {
                error!("❌ Failed to query user: {e:?}");
                self.tracer
                    .failure(&tracing_ctx, method, "Database error")
                    .await;
                return Err(ServiceError::Repo(e));
            }
        };

        if let Err(e) = self.hash.compare_password(&user.password, &req.password).await {
            warn!("⚠️ Invalid password for user: {email}");
            self.tracer
                .failure(&tracing_ctx, method, "Invalid password")
                .await;
            return Err(match e {
                ServiceError::Internal(_) => e,
                _ => ServiceError::InvalidCredentials,
            });
        }

        if !user.is_approved {
            warn!("⚠️ Login refused, account {} is not approved", user.user_id);
            self.tracer
                .failure(&tracing_ctx, method, "Account not approved")
                .await;
            return Err(ServiceError::NotApproved);
        }

        let session = match open_session(Principal::Doctor {
            user_id: user.user_id,
            email: user.email.clone(),
        }) {
            Ok(session) => session,
            Err(e) => {
                self.tracer
                    .failure(&tracing_ctx, method, "Failed to open session")
                    .await;
                return Err(e);
            }
        };

        if let Err(e) = self.sessions.create_session(&session, self.session_ttl).await {
            error!("❌ Failed to store session for user {}: {e}", user.user_id);
            self.tracer
                .failure(&tracing_ctx, method, "Failed to store session")
                .await;
            return Err(e);
        }

        info!("✅ Login successful for email: {email}");
        self.tracer
            .success(&tracing_ctx, method, "Login successful")
            .await;

        Ok(AuthenticatedSession {
            session,
            ttl_seconds: self.session_ttl.num_seconds(),
            response: ApiResponse::success("Login successful", UserResponse::from(user)),
        })
    }

    async fn logout(&self, session_id: &str) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("Logout", vec![KeyValue::new("component", "auth")]);

        if !self.sessions.delete_session(session_id).await {
            info!("👋 Logout for a session that was already gone");
        }

        self.tracer
            .success(&tracing_ctx, Method::Post, "Logged out")
            .await;

        Ok(ApiResponse::success("Logged out", ()))
    }

    async fn me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "Me",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let result = match self.query.find_by_id(user_id).await {
            Ok(Some(user)) => Ok(ApiResponse::success(
                "Profile retrieved",
                UserResponse::from(user),
            )),
            Ok(None) => Err(ServiceError::not_found("User")),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Profile retrieved")
            .await
    }

    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "UpdateProfile",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let result = self
            .command
            .update_profile(user_id, req)
            .await
            .map(|user| ApiResponse::success("Profile updated", UserResponse::from(user)))
            .map_err(ServiceError::from);

        self.tracer
            .record(&tracing_ctx, Method::Put, result, "Profile updated")
            .await
    }
}
