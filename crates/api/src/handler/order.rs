use crate::middleware::{
    session::{DoctorId, require_doctor},
    validate::{SimpleValidatedJson, SimpleValidatedQuery},
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
    abstract_trait::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::{CheckoutRequest, FindAllOrders, SubmitPaymentRequest},
        responses::{
            ApiResponse, ApiResponsePagination, BankDetailsResponse, OrderDetailResponse,
            OrderResponse,
        },
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    tag = "Order",
    security(("session_cookie" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order placed from the cart", body = ApiResponse<OrderDetailResponse>),
        (status = 400, description = "Empty cart or invalid input"),
        (status = 403, description = "Account not approved"),
        (status = 409, description = "Product inactive or out of stock")
    )
)]
pub async fn checkout(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    SimpleValidatedJson(body): SimpleValidatedJson<CheckoutRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.checkout(user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("session_cookie" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "Orders of the current doctor", body = ApiResponsePagination<Vec<OrderResponse>>)
    )
)]
pub async fn get_my_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_mine(user_id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderDetailResponse>),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_my_order(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_my_order(user_id, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/cancel",
    tag = "Order",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled and restocked", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is no longer pending")
    )
)]
pub async fn cancel_my_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.cancel_my_order(user_id, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/payment",
    tag = "Order",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = SubmitPaymentRequest,
    responses(
        (status = 200, description = "Transfer reference recorded", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not a pending bank transfer")
    )
)]
pub async fn submit_payment(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<SubmitPaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.submit_payment(user_id, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/bank-details",
    tag = "Order",
    responses(
        (status = 200, description = "Account for manual bank transfers", body = ApiResponse<BankDetailsResponse>)
    )
)]
pub async fn get_bank_details(
    Extension(service): Extension<DynOrderCommandService>,
) -> Result<impl IntoResponse, HttpError> {
    Ok((StatusCode::OK, Json(service.bank_details())))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let orders = &app_state.di_container.order_service;

    let doctor_routes = OpenApiRouter::new()
        .route("/api/orders", get(get_my_orders))
        .route("/api/orders/checkout", post(checkout))
        .route("/api/orders/{id}", get(get_my_order))
        .route("/api/orders/{id}/cancel", put(cancel_my_order))
        .route("/api/orders/{id}/payment", post(submit_payment))
        .route_layer(middleware::from_fn(require_doctor));

    OpenApiRouter::new()
        .route("/api/bank-details", get(get_bank_details))
        .merge(doctor_routes)
        .layer(Extension(orders.query.clone()))
        .layer(Extension(orders.command.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
