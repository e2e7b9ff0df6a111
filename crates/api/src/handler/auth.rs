use crate::middleware::{
    rate_limit::rate_limit_middleware,
    session::{
        DoctorId, clear_session_cookie, require_doctor, require_session, session_cookie,
        session_id,
    },
    validate::SimpleValidatedJson,
};
use axum::{
    Extension, Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynAuthService,
    config::SessionConfig,
    domain::{
        requests::{LoginRequest, RegisterDoctorRequest, UpdateProfileRequest},
        responses::{ApiResponse, SessionResponse, UserResponse},
        session::Session,
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterDoctorRequest,
    responses(
        (status = 201, description = "Registration received, awaiting approval", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Auth"
)]
pub async fn register_handler(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<RegisterDoctorRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.register(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = ApiResponse<UserResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account awaiting approval"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Auth"
)]
pub async fn login_handler(
    Extension(service): Extension<DynAuthService>,
    Extension(config): Extension<SessionConfig>,
    jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let authenticated = service.login(&body).await?;

    info!(
        "🍪 Doctor session issued, valid for {}s",
        authenticated.ttl_seconds
    );

    let jar = jar.add(session_cookie(
        authenticated.session.session_id,
        config.cookie_secure,
    ));

    Ok((jar, Json(authenticated.response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session removed and cookie expired", body = serde_json::Value)
    ),
    tag = "Auth"
)]
pub async fn logout_handler(
    Extension(service): Extension<DynAuthService>,
    jar: CookieJar,
) -> Result<impl IntoResponse, HttpError> {
    let response = match session_id(&jar) {
        Some(id) => service.logout(&id).await?,
        None => ApiResponse::success("Logged out", ()),
    };

    Ok((clear_session_cookie(jar), Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Current doctor", body = ApiResponse<UserResponse>),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not a doctor session")
    ),
    tag = "Auth"
)]
pub async fn get_me_handler(
    Extension(service): Extension<DynAuthService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.me(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/auth/profile",
    security(("session_cookie" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not logged in")
    ),
    tag = "Auth"
)]
pub async fn update_profile_handler(
    Extension(service): Extension<DynAuthService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_profile(user_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Who the cookie belongs to", body = ApiResponse<SessionResponse>),
        (status = 401, description = "Not logged in")
    ),
    tag = "Auth"
)]
pub async fn session_handler(
    Extension(session): Extension<Session>,
    Extension(config): Extension<SessionConfig>,
) -> Result<impl IntoResponse, HttpError> {
    let data = SessionResponse::from_principal(&session.principal, config.ttl_hours * 3600);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Session is active", data)),
    ))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route_layer(middleware::from_fn(rate_limit_middleware))
        .route("/api/auth/logout", post(logout_handler));

    let doctor_routes = OpenApiRouter::new()
        .route("/api/auth/me", get(get_me_handler))
        .route("/api/auth/profile", put(update_profile_handler))
        .route_layer(middleware::from_fn(require_doctor));

    let session_routes = OpenApiRouter::new()
        .route("/api/auth/session", get(session_handler))
        .route_layer(middleware::from_fn(require_session));

    public_routes
        .merge(doctor_routes)
        .merge(session_routes)
        .layer(Extension(app_state.di_container.auth_service.clone()))
        .layer(Extension(app_state.rate_limiter.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
