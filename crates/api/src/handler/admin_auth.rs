use crate::middleware::{
    rate_limit::rate_limit_middleware,
    session::{clear_session_cookie, require_admin, session_cookie, session_id},
    validate::SimpleValidatedJson,
};
use axum::{
    Extension, Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynAdminAuthService,
    config::SessionConfig,
    domain::{
        requests::{AdminLoginRequest, CreateAdminRequest},
        responses::{AdminResponse, ApiResponse},
        session::Session,
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin session cookie set", body = ApiResponse<AdminResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Admin Auth"
)]
pub async fn admin_login_handler(
    Extension(service): Extension<DynAdminAuthService>,
    Extension(config): Extension<SessionConfig>,
    jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<AdminLoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let authenticated = service.login(&body).await?;

    let jar = jar.add(session_cookie(
        authenticated.session.session_id,
        config.cookie_secure,
    ));

    Ok((jar, Json(authenticated.response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/logout",
    responses(
        (status = 200, description = "Session removed and cookie expired", body = serde_json::Value)
    ),
    tag = "Admin Auth"
)]
pub async fn admin_logout_handler(
    Extension(service): Extension<DynAdminAuthService>,
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
    path = "/api/admin/me",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Current admin", body = ApiResponse<AdminResponse>),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not an admin session")
    ),
    tag = "Admin Auth"
)]
pub async fn admin_me_handler(
    Extension(service): Extension<DynAdminAuthService>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.me(&session).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/admins",
    security(("session_cookie" = [])),
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin account created", body = ApiResponse<AdminResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username taken")
    ),
    tag = "Admin Auth"
)]
pub async fn create_admin_handler(
    Extension(service): Extension<DynAdminAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateAdminRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_admin(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/admins",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Admin accounts", body = ApiResponse<Vec<AdminResponse>>),
        (status = 401, description = "Not logged in")
    ),
    tag = "Admin Auth"
)]
pub async fn list_admins_handler(
    Extension(service): Extension<DynAdminAuthService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_admins().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/admin/login", post(admin_login_handler))
        .route_layer(middleware::from_fn(rate_limit_middleware))
        .route("/api/admin/logout", post(admin_logout_handler));

    let admin_routes = OpenApiRouter::new()
        .route("/api/admin/me", get(admin_me_handler))
        .route(
            "/api/admin/admins",
            get(list_admins_handler).post(create_admin_handler),
        )
        .route_layer(middleware::from_fn(require_admin));

    public_routes
        .merge(admin_routes)
        .layer(Extension(app_state.di_container.admin_auth_service.clone()))
        .layer(Extension(app_state.rate_limiter.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
