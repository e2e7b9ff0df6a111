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
    routing::{delete, get, post},
};
use shared::{
    abstract_trait::DynNewsletterService,
    domain::{
        requests::{FindAllNewsletters, SubscribeRequest},
        responses::{ApiResponse, ApiResponsePagination, NewsletterResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/newsletter/subscribe",
    tag = "Newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = ApiResponse<NewsletterResponse>),
        (status = 400, description = "Invalid email"),
        (status = 409, description = "Already subscribed")
    )
)]
pub async fn subscribe(
    Extension(service): Extension<DynNewsletterService>,
    SimpleValidatedJson(body): SimpleValidatedJson<SubscribeRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.subscribe(&body.email).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/newsletter/unsubscribe",
    tag = "Newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Unsubscribed", body = serde_json::Value),
        (status = 404, description = "Not subscribed")
    )
)]
pub async fn unsubscribe(
    Extension(service): Extension<DynNewsletterService>,
    SimpleValidatedJson(body): SimpleValidatedJson<SubscribeRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.unsubscribe(&body.email).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/newsletter",
    tag = "Newsletter",
    security(("session_cookie" = [])),
    params(FindAllNewsletters),
    responses(
        (status = 200, description = "Subscribers", body = ApiResponsePagination<Vec<NewsletterResponse>>)
    )
)]
pub async fn get_subscribers(
    Extension(service): Extension<DynNewsletterService>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllNewsletters>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/newsletter/{id}",
    tag = "Newsletter",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Subscriber ID")),
    responses(
        (status = 200, description = "Subscriber removed", body = serde_json::Value),
        (status = 404, description = "Subscriber not found")
    )
)]
pub async fn delete_subscriber(
    Extension(service): Extension<DynNewsletterService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn newsletter_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let admin_routes = OpenApiRouter::new()
        .route("/api/admin/newsletter", get(get_subscribers))
        .route("/api/admin/newsletter/{id}", delete(delete_subscriber))
        .route_layer(middleware::from_fn(require_admin));

    OpenApiRouter::new()
        .route("/api/newsletter/subscribe", post(subscribe))
        .route("/api/newsletter/unsubscribe", post(unsubscribe))
        .merge(admin_routes)
        .layer(Extension(app_state.di_container.newsletter_service.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
