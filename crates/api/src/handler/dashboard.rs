use crate::middleware::session::require_admin;
use axum::{
    Extension, Json, http::StatusCode, middleware, response::IntoResponse, routing::get,
};
use shared::{
    abstract_trait::DynDashboardService,
    domain::responses::{ApiResponse, DashboardStatsResponse},
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "Dashboard",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Marketplace counters", body = ApiResponse<DashboardStatsResponse>),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_stats(
    Extension(service): Extension<DynDashboardService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.stats().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn dashboard_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admin/dashboard", get(get_stats))
        .route_layer(middleware::from_fn(require_admin))
        .layer(Extension(app_state.di_container.dashboard_service.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
