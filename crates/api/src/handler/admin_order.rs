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
    routing::{get, put},
};
use shared::{
    abstract_trait::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::{CancelOrderRequest, DeclineOrderRequest, FindAllOrders},
        responses::{ApiResponse, ApiResponsePagination, OrderDetailResponse, OrderResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "Order Admin",
    security(("session_cookie" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "All orders", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    tag = "Order Admin",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items and buyer", body = ApiResponse<OrderDetailResponse>),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/approve",
    tag = "Order Admin",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order approved", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is no longer pending")
    )
)]
pub async fn approve_order(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.approve_order(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/decline",
    tag = "Order Admin",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = DeclineOrderRequest,
    responses(
        (status = 200, description = "Order declined and restocked", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Reason missing"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is no longer pending")
    )
)]
pub async fn decline_order(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<DeclineOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.decline_order(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/cancel",
    tag = "Order Admin",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = CancelOrderRequest,
    responses(
        (status = 200, description = "Order cancelled and restocked", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is no longer pending")
    )
)]
pub async fn cancel_order(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<CancelOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.cancel_order(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let orders = &app_state.di_container.order_service;

    OpenApiRouter::new()
        .route("/api/admin/orders", get(get_orders))
        .route("/api/admin/orders/{id}", get(get_order))
        .route("/api/admin/orders/{id}/approve", put(approve_order))
        .route("/api/admin/orders/{id}/decline", put(decline_order))
        .route("/api/admin/orders/{id}/cancel", put(cancel_order))
        .route_layer(middleware::from_fn(require_admin))
        .layer(Extension(orders.query.clone()))
        .layer(Extension(orders.command.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
