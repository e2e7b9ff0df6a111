use crate::middleware::{
    session::{DoctorId, require_admin, require_doctor},
    validate::{SimpleValidatedJson, SimpleValidatedQuery},
};
use axum::{
    Extension, Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::{
    abstract_trait::DynReferralService,
    domain::{
        requests::{CreateReferralRequest, FindAllReferrals},
        responses::{ApiResponse, ApiResponsePagination, ReferralResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/referrals",
    tag = "Referral",
    security(("session_cookie" = [])),
    request_body = CreateReferralRequest,
    responses(
        (status = 201, description = "Referral stored and invitation sent", body = ApiResponse<ReferralResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already belongs to a doctor")
    )
)]
pub async fn create_referral(
    Extension(service): Extension<DynReferralService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateReferralRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create(user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/referrals",
    tag = "Referral",
    security(("session_cookie" = [])),
    params(FindAllReferrals),
    responses(
        (status = 200, description = "Referrals made by the current doctor", body = ApiResponsePagination<Vec<ReferralResponse>>)
    )
)]
pub async fn get_my_referrals(
    Extension(service): Extension<DynReferralService>,
    Extension(DoctorId(user_id)): Extension<DoctorId>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllReferrals>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_mine(user_id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/referrals",
    tag = "Referral",
    security(("session_cookie" = [])),
    params(FindAllReferrals),
    responses(
        (status = 200, description = "All referrals", body = ApiResponsePagination<Vec<ReferralResponse>>)
    )
)]
pub async fn get_referrals(
    Extension(service): Extension<DynReferralService>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllReferrals>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn referral_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let doctor_routes = OpenApiRouter::new()
        .route(
            "/api/referrals",
            get(get_my_referrals).post(create_referral),
        )
        .route_layer(middleware::from_fn(require_doctor));

    let admin_routes = OpenApiRouter::new()
        .route("/api/admin/referrals", get(get_referrals))
        .route_layer(middleware::from_fn(require_admin));

    doctor_routes
        .merge(admin_routes)
        .layer(Extension(app_state.di_container.referral_service.clone()))
        .layer(Extension(app_state.sessions.clone()))
        .layer(Extension(app_state.session_config.clone()))
}
