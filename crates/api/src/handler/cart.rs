use crate::middleware::{
    session::{DoctorId, require_doctor},
    validate::SimpleValidatedJson,
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    abstract_trait::DynCartService,
    domain::{
        requests::{AddToCartRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Cart lines with totals", body = ApiResponse<CartResponse>),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_cart(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = "Cart",
    security(("session_cookie" = [])),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Item added; repeated adds merge quantities", body = ApiResponse<CartResponse>),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Not enough stock")
    )
)]
pub async fn add_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddToCartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_item(user_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{id}",
    tag = "Cart",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Cart item ID")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart item not found"),
        (status = 409, description = "Not enough stock")
    )
)]
pub async fn update_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_item(user_id, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    tag = "Cart",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Cart item ID")),
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart item not found")
    )
)]
pub async fn remove_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove_item(user_id, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = "Cart",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartResponse>)
    )
)]
pub async fn clear_cart(
    Extension(service): Extension<DynCartService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.clear(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cart", get(get_cart).delete(clear_cart))
        .route("/api/cart/items", post(add_cart_item))
        .route(
            "/api/cart/items/{id}",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route_layer(middleware::from_fn(require_doctor))
        .layer(Extension(app_state.di_container.cart_service.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
