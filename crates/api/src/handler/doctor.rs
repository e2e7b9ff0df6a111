use crate::middleware::{session::require_admin, validate::SimpleValidatedQuery};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::{
    abstract_trait::DynDoctorAdminService,
    domain::{
        requests::FindAllUsers,
        responses::{ApiResponse, ApiResponsePagination, UserResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/admin/doctors",
    tag = "Doctors",
    security(("session_cookie" = [])),
    params(FindAllUsers),
    responses(
        (status = 200, description = "Doctor accounts", body = ApiResponsePagination<Vec<UserResponse>>),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_doctors(
    Extension(service): Extension<DynDoctorAdminService>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllUsers>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/doctors/{id}",
    tag = "Doctors",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Doctor details", body = ApiResponse<UserResponse>),
        (status = 404, description = "Doctor not found")
    )
)]
pub async fn get_doctor(
    Extension(service): Extension<DynDoctorAdminService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/doctors/{id}/approve",
    tag = "Doctors",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Doctor approved and notified", body = ApiResponse<UserResponse>),
        (status = 404, description = "Doctor not found")
    )
)]
pub async fn approve_doctor(
    Extension(service): Extension<DynDoctorAdminService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.approve(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/doctors/{id}/revoke",
    tag = "Doctors",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Approval revoked", body = ApiResponse<UserResponse>),
        (status = 404, description = "Doctor not found")
    )
)]
pub async fn revoke_doctor(
    Extension(service): Extension<DynDoctorAdminService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.revoke(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/doctors/{id}",
    tag = "Doctors",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Doctor deleted", body = serde_json::Value),
        (status = 404, description = "Doctor not found")
    )
)]
pub async fn delete_doctor(
    Extension(service): Extension<DynDoctorAdminService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn doctor_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admin/doctors", get(get_doctors))
        .route(
            "/api/admin/doctors/{id}",
            get(get_doctor).delete(delete_doctor),
        )
        .route("/api/admin/doctors/{id}/approve", put(approve_doctor))
        .route("/api/admin/doctors/{id}/revoke", put(revoke_doctor))
        .route_layer(middleware::from_fn(require_admin))
        .layer(Extension(
            app_state.di_container.doctor_admin_service.clone(),
        ))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
