use crate::middleware::{session::require_admin, validate::SimpleValidatedJson};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::{
    abstract_trait::DynHomepageService,
    domain::{
        requests::{
            CreateCarouselItemRequest, CreateFeaturedRequest, ReorderCarouselRequest,
            UpdateCarouselItemRequest, UpdateFeaturedRequest,
        },
        responses::{
            ApiResponse, CarouselItemResponse, FeaturedProductResponse, HomepageResponse,
        },
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/homepage",
    tag = "Homepage",
    responses(
        (status = 200, description = "Carousel, featured products, categories and brands", body = ApiResponse<HomepageResponse>)
    )
)]
pub async fn get_homepage(
    Extension(service): Extension<DynHomepageService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.homepage().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/carousel",
    tag = "Homepage",
    responses(
        (status = 200, description = "Active carousel items in display order", body = ApiResponse<Vec<CarouselItemResponse>>)
    )
)]
pub async fn get_carousel(
    Extension(service): Extension<DynHomepageService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_carousel(true).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/featured",
    tag = "Homepage",
    responses(
        (status = 200, description = "Active featured products in display order", body = ApiResponse<Vec<FeaturedProductResponse>>)
    )
)]
pub async fn get_featured(
    Extension(service): Extension<DynHomepageService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_featured(true).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/carousel",
    tag = "Homepage",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All carousel items", body = ApiResponse<Vec<CarouselItemResponse>>)
    )
)]
pub async fn admin_get_carousel(
    Extension(service): Extension<DynHomepageService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_carousel(false).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/carousel",
    tag = "Homepage",
    security(("session_cookie" = [])),
    request_body = CreateCarouselItemRequest,
    responses(
        (status = 201, description = "Carousel item created", body = ApiResponse<CarouselItemResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_carousel_item(
    Extension(service): Extension<DynHomepageService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCarouselItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_carousel_item(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/carousel/{id}",
    tag = "Homepage",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Carousel item ID")),
    request_body = UpdateCarouselItemRequest,
    responses(
        (status = 200, description = "Carousel item updated", body = ApiResponse<CarouselItemResponse>),
        (status = 404, description = "Carousel item not found")
    )
)]
pub async fn update_carousel_item(
    Extension(service): Extension<DynHomepageService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(mut body): SimpleValidatedJson<UpdateCarouselItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = id;
    let response = service.update_carousel_item(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/carousel/{id}",
    tag = "Homepage",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Carousel item ID")),
    responses(
        (status = 200, description = "Carousel item deleted", body = serde_json::Value),
        (status = 404, description = "Carousel item not found")
    )
)]
pub async fn delete_carousel_item(
    Extension(service): Extension<DynHomepageService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_carousel_item(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/carousel/reorder",
    tag = "Homepage",
    security(("session_cookie" = [])),
    request_body = ReorderCarouselRequest,
    responses(
        (status = 200, description = "New order applied", body = ApiResponse<Vec<CarouselItemResponse>>),
        (status = 400, description = "Empty list"),
        (status = 404, description = "Unknown carousel item")
    )
)]
pub async fn reorder_carousel(
    Extension(service): Extension<DynHomepageService>,
    SimpleValidatedJson(body): SimpleValidatedJson<ReorderCarouselRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.reorder_carousel(&body.items).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/featured",
    tag = "Homepage",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All featured entries", body = ApiResponse<Vec<FeaturedProductResponse>>)
    )
)]
pub async fn admin_get_featured(
    Extension(service): Extension<DynHomepageService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_featured(false).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/featured",
    tag = "Homepage",
    security(("session_cookie" = [])),
    request_body = CreateFeaturedRequest,
    responses(
        (status = 201, description = "Product featured", body = ApiResponse<FeaturedProductResponse>),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product already featured")
    )
)]
pub async fn add_featured(
    Extension(service): Extension<DynHomepageService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateFeaturedRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_featured(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/featured/{id}",
    tag = "Homepage",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Featured entry ID")),
    request_body = UpdateFeaturedRequest,
    responses(
        (status = 200, description = "Featured entry updated", body = ApiResponse<FeaturedProductResponse>),
        (status = 404, description = "Featured entry not found")
    )
)]
pub async fn update_featured(
    Extension(service): Extension<DynHomepageService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(mut body): SimpleValidatedJson<UpdateFeaturedRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = id;
    let response = service.update_featured(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/featured/{id}",
    tag = "Homepage",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Featured entry ID")),
    responses(
        (status = 200, description = "Featured entry removed", body = serde_json::Value),
        (status = 404, description = "Featured entry not found")
    )
)]
pub async fn remove_featured(
    Extension(service): Extension<DynHomepageService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove_featured(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn homepage_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/homepage", get(get_homepage))
        .route("/api/carousel", get(get_carousel))
        .route("/api/featured", get(get_featured));

    let admin_routes = OpenApiRouter::new()
        .route(
            "/api/admin/carousel",
            get(admin_get_carousel).post(create_carousel_item),
        )
        .route("/api/admin/carousel/reorder", put(reorder_carousel))
        .route(
            "/api/admin/carousel/{id}",
            put(update_carousel_item).delete(delete_carousel_item),
        )
        .route(
            "/api/admin/featured",
            get(admin_get_featured).post(add_featured),
        )
        .route(
            "/api/admin/featured/{id}",
            put(update_featured).delete(remove_featured),
        )
        .route_layer(middleware::from_fn(require_admin));

    public_routes
        .merge(admin_routes)
        .layer(Extension(app_state.di_container.homepage_service.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
