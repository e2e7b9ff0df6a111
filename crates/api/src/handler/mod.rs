mod admin_auth;
mod admin_order;
mod auth;
mod brand;
mod cart;
mod category;
mod dashboard;
mod doctor;
mod homepage;
mod newsletter;
mod order;
mod product;
mod referral;
mod upload;

use crate::middleware::session::SESSION_COOKIE;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::{
    errors::HttpError,
    service::{MAX_IMAGE_BYTES, UPLOADS_ROUTE},
    state::AppState,
    utils::shutdown_signal,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::admin_auth::admin_auth_routes;
pub use self::admin_order::admin_order_routes;
pub use self::auth::auth_routes;
pub use self::brand::brand_routes;
pub use self::cart::cart_routes;
pub use self::category::category_routes;
pub use self::dashboard::dashboard_routes;
pub use self::doctor::doctor_routes;
pub use self::homepage::homepage_routes;
pub use self::newsletter::newsletter_routes;
pub use self::order::order_routes;
pub use self::product::product_routes;
pub use self::referral::referral_routes;
pub use self::upload::upload_routes;

/// Largest request body accepted; leaves room for multipart framing around an image.
pub const MAX_BODY_BYTES: usize = MAX_IMAGE_BYTES + 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_checker_handler,

        auth::register_handler,
        auth::login_handler,
        auth::logout_handler,
        auth::get_me_handler,
        auth::update_profile_handler,
        auth::session_handler,

        admin_auth::admin_login_handler,
        admin_auth::admin_logout_handler,
        admin_auth::admin_me_handler,
        admin_auth::create_admin_handler,
        admin_auth::list_admins_handler,

        doctor::get_doctors,
        doctor::get_doctor,
        doctor::approve_doctor,
        doctor::revoke_doctor,
        doctor::delete_doctor,

        product::get_products,
        product::get_product,
        product::get_product_by_slug,
        product::admin_get_products,
        product::admin_get_product,
        product::create_product,
        product::update_product,
        product::delete_product,

        category::get_categories,
        category::get_category,
        category::create_category,
        category::update_category,
        category::update_category_image,
        category::delete_category,

        brand::get_brands,
        brand::get_brand,
        brand::create_brand,
        brand::update_brand,
        brand::update_brand_image,
        brand::delete_brand,

        cart::get_cart,
        cart::add_cart_item,
        cart::update_cart_item,
        cart::remove_cart_item,
        cart::clear_cart,

        order::checkout,
        order::get_my_orders,
        order::get_my_order,
        order::cancel_my_order,
        order::submit_payment,
        order::get_bank_details,

        admin_order::get_orders,
        admin_order::get_order,
        admin_order::approve_order,
        admin_order::decline_order,
        admin_order::cancel_order,

        homepage::get_homepage,
        homepage::get_carousel,
        homepage::get_featured,
        homepage::admin_get_carousel,
        homepage::create_carousel_item,
        homepage::update_carousel_item,
        homepage::delete_carousel_item,
        homepage::reorder_carousel,
        homepage::admin_get_featured,
        homepage::add_featured,
        homepage::update_featured,
        homepage::remove_featured,

        upload::upload_image,

        newsletter::subscribe,
        newsletter::unsubscribe,
        newsletter::get_subscribers,
        newsletter::delete_subscriber,

        referral::create_referral,
        referral::get_my_referrals,
        referral::get_referrals,

        dashboard::get_stats,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Auth", description = "Doctor registration and sessions"),
        (name = "Admin Auth", description = "Administrator sessions and accounts"),
        (name = "Doctors", description = "Doctor approval queue"),
        (name = "Product", description = "Catalog products"),
        (name = "Category", description = "Product categories"),
        (name = "Brand", description = "Product brands"),
        (name = "Cart", description = "Shopping cart of the current doctor"),
        (name = "Order", description = "Checkout and the doctor's own orders"),
        (name = "Order Admin", description = "Order review and status changes"),
        (name = "Homepage", description = "Homepage carousel and featured products"),
        (name = "Upload", description = "Image uploads"),
        (name = "Newsletter", description = "Newsletter subscriptions"),
        (name = "Referral", description = "Doctor-to-doctor referrals"),
        (name = "Dashboard", description = "Admin dashboard"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/healthchecker",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = serde_json::Value)
    )
)]
pub async fn health_checker_handler() -> Result<impl IntoResponse, HttpError> {
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "success",
            "message": "Medical supply marketplace API is running"
        })),
    ))
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        error!("❌ Failed to encode metrics: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub struct AppRouter;

impl AppRouter {
    /// Full application router: API routes, Swagger UI and uploaded files.
    pub fn build(app_state: AppState, upload_dir: &str) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .route("/api/healthchecker", get(health_checker_handler))
            .merge(auth_routes(shared_state.clone()))
            .merge(admin_auth_routes(shared_state.clone()))
            .merge(doctor_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(category_routes(shared_state.clone()))
            .merge(brand_routes(shared_state.clone()))
            .merge(cart_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()))
            .merge(admin_order_routes(shared_state.clone()))
            .merge(homepage_routes(shared_state.clone()))
            .merge(upload_routes(shared_state.clone()))
            .merge(newsletter_routes(shared_state.clone()))
            .merge(referral_routes(shared_state.clone()))
            .merge(dashboard_routes(shared_state));

        let (app_router, api) = api_router.split_for_parts();

        app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .nest_service(UPLOADS_ROUTE, ServeDir::new(upload_dir))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(port: u16, app_state: AppState, upload_dir: &str) -> Result<()> {
        let app = Self::build(app_state, upload_dir);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        Ok(())
    }
}
