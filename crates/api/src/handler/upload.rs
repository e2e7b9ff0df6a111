use crate::middleware::session::require_admin;
use axum::{
    Extension, Json,
    extract::Multipart,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use shared::{
    abstract_trait::DynUploadService,
    domain::responses::{ApiResponse, UploadResponse},
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

pub const UPLOAD_FIELD: &str = "file";

/// Multipart form accepted by the upload endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/admin/uploads",
    tag = "Upload",
    security(("session_cookie" = [])),
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored under /uploads", body = ApiResponse<UploadResponse>),
        (status = 400, description = "Missing, empty, oversized or non-image file")
    )
)]
pub async fn upload_image(
    Extension(service): Extension<DynUploadService>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("⚠️ Malformed multipart body: {e}");
        HttpError::BadRequest(e.body_text())
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| HttpError::BadRequest(e.body_text()))?;

        let response = service
            .store_image(content_type.as_deref(), bytes.to_vec())
            .await?;

        return Ok((StatusCode::CREATED, Json(response)));
    }

    Err(HttpError::BadRequest(format!(
        "Multipart field '{UPLOAD_FIELD}' is required"
    )))
}

pub fn upload_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admin/uploads", post(upload_image))
        .route_layer(middleware::from_fn(require_admin))
        .layer(Extension(app_state.di_container.upload_service.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
