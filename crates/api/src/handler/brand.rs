use crate::middleware::{session::require_admin, validate::SimpleValidatedJson};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    abstract_trait::DynTaxonomyService,
    domain::{
        requests::{CreateTaxonomyRequest, UpdateImageRequest, UpdateTaxonomyRequest},
        responses::{ApiResponse, TaxonomyResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/brands",
    tag = "Brand",
    responses(
        (status = 200, description = "All brands", body = ApiResponse<Vec<TaxonomyResponse>>)
    )
)]
pub async fn get_brands(
    Extension(service): Extension<DynTaxonomyService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/brands/{id}",
    tag = "Brand",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand details", body = ApiResponse<TaxonomyResponse>),
        (status = 404, description = "Brand not found")
    )
)]
pub async fn get_brand(
    Extension(service): Extension<DynTaxonomyService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/brands",
    tag = "Brand",
    security(("session_cookie" = [])),
    request_body = CreateTaxonomyRequest,
    responses(
        (status = 201, description = "Brand created", body = ApiResponse<TaxonomyResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already used")
    )
)]
pub async fn create_brand(
    Extension(service): Extension<DynTaxonomyService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateTaxonomyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/brands/{id}",
    tag = "Brand",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Brand ID")),
    request_body = UpdateTaxonomyRequest,
    responses(
        (status = 200, description = "Brand updated", body = ApiResponse<TaxonomyResponse>),
        (status = 404, description = "Brand not found"),
        (status = 409, description = "Slug already used")
    )
)]
pub async fn update_brand(
    Extension(service): Extension<DynTaxonomyService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(mut body): SimpleValidatedJson<UpdateTaxonomyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = id;
    let response = service.update(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/brands/{id}/image",
    tag = "Brand",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Brand ID")),
    request_body = UpdateImageRequest,
    responses(
        (status = 200, description = "Homepage image replaced", body = ApiResponse<TaxonomyResponse>),
        (status = 404, description = "Brand not found")
    )
)]
pub async fn update_brand_image(
    Extension(service): Extension<DynTaxonomyService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateImageRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_image(id, &body.image_url).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/brands/{id}",
    tag = "Brand",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand deleted", body = serde_json::Value),
        (status = 404, description = "Brand not found")
    )
)]
pub async fn delete_brand(
    Extension(service): Extension<DynTaxonomyService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn brand_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/brands", get(get_brands))
        .route("/api/brands/{id}", get(get_brand));

    let admin_routes = OpenApiRouter::new()
        .route("/api/admin/brands", post(create_brand))
        .route(
            "/api/admin/brands/{id}",
            put(update_brand).delete(delete_brand),
        )
        .route("/api/admin/brands/{id}/image", put(update_brand_image))
        .route_layer(middleware::from_fn(require_admin));

    public_routes
        .merge(admin_routes)
        .layer(Extension(app_state.di_container.brand_service.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
