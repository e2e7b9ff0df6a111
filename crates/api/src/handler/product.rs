use crate::middleware::{
    session::require_admin,
    validate::{SimpleValidatedJson, SimpleValidatedQuery},
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::{
    abstract_trait::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        responses::{ApiResponse, ApiResponsePagination, ProductResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    params(FindAllProducts),
    responses(
        (status = 200, description = "Active products", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_active(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id, false).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/slug/{slug}",
    tag = "Product",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product_by_slug(
    Extension(service): Extension<DynProductQueryService>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_slug(&slug).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = "Product",
    security(("session_cookie" = [])),
    params(FindAllProducts),
    responses(
        (status = 200, description = "All products including inactive", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn admin_get_products(
    Extension(service): Extension<DynProductQueryService>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{id}",
    tag = "Product",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn admin_get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id, true).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    tag = "Product",
    security(("session_cookie" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already used")
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_product(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    tag = "Product",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Slug already used")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(mut body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = id;
    let response = service.update_product(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    tag = "Product",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = serde_json::Value),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_product(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let products = &app_state.di_container.product_service;

    let public_routes = OpenApiRouter::new()
        .route("/api/products", get(get_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/products/slug/{slug}", get(get_product_by_slug));

    let admin_routes = OpenApiRouter::new()
        .route(
            "/api/admin/products",
            get(admin_get_products).post(create_product),
        )
        .route(
            "/api/admin/products/{id}",
            get(admin_get_product)
                .put(update_product)
                .delete(delete_product),
        )
        .route_layer(middleware::from_fn(require_admin));

    public_routes
        .merge(admin_routes)
        .layer(Extension(products.query.clone()))
        .layer(Extension(products.command.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
