mod common;

use axum::http::{StatusCode, header};
use common::{admin, app, app_with_limit, body_json, doctor, get, json};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_needs_no_session() {
    let app = app().await;

    let response = app
        .router
        .oneshot(get("/api/healthchecker", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "success");
}

#[tokio::test]
async fn openapi_document_lists_the_marketplace_routes() {
    let app = app().await;

    let response = app
        .router
        .oneshot(get("/api-docs/openapi.json", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    for path in [
        "/api/auth/register",
        "/api/cart/items",
        "/api/orders/checkout",
        "/api/admin/orders/{id}/decline",
        "/api/homepage",
    ] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
    assert!(doc["components"]["securitySchemes"]["session_cookie"].is_object());
}

#[tokio::test]
async fn doctor_routes_require_a_session() {
    let app = app().await;

    let response = app.router.oneshot(get("/api/cart", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn unknown_session_ids_are_rejected() {
    let app = app().await;

    let response = app
        .router
        .oneshot(get("/api/admin/orders", Some("forged-session-id")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn doctors_cannot_reach_admin_routes() {
    let app = app().await;
    app.sessions.sign_in("doctor-sid", doctor(5));

    let response = app
        .router
        .oneshot(get("/api/admin/doctors", Some("doctor-sid")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[tokio::test]
async fn admins_cannot_shop() {
    let app = app().await;
    app.sessions.sign_in("admin-sid", admin());

    let response = app
        .router
        .oneshot(get("/api/cart", Some("admin-sid")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn session_endpoint_describes_either_principal() {
    let app = app().await;
    app.sessions.sign_in("doctor-sid", doctor(9));
    app.sessions.sign_in("admin-sid", admin());

    let response = app
        .router
        .clone()
        .oneshot(get("/api/auth/session", Some("doctor-sid")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["kind"], "doctor");
    assert_eq!(body["data"]["id"], 9);
    assert_eq!(body["data"]["expires_in_seconds"], 24 * 3600);

    let response = app
        .router
        .oneshot(get("/api/auth/session", Some("admin-sid")))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["data"]["kind"], "admin");
}

#[tokio::test]
async fn registration_errors_are_reported_per_field() {
    let app = app().await;

    let response = app
        .router
        .oneshot(json(
            "POST",
            "/api/auth/register",
            json!({
                "first_name": "Meredith",
                "last_name": "Grey",
                "email": "not-an-email",
                "password": "short",
                "confirm_password": "short",
                "license_number": "SGH-2005"
            }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
    assert!(body["details"].get("first_name").is_none());
}

#[tokio::test]
async fn cart_quantity_is_validated_before_the_service_runs() {
    let app = app().await;
    app.sessions.sign_in("doctor-sid", doctor(5));

    let response = app
        .router
        .oneshot(json(
            "POST",
            "/api/cart/items",
            json!({ "product_id": 3, "quantity": 0 }),
            Some("doctor-sid"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["details"]["quantity"].is_array());
}

#[tokio::test]
async fn inverted_price_range_is_rejected() {
    let app = app().await;

    let response = app
        .router
        .oneshot(get("/api/products?min_price=5000&max_price=100", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn non_json_bodies_are_unsupported() {
    let app = app().await;

    let request = axum::http::Request::post("/api/newsletter/subscribe")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(axum::body::Body::from("email=a@b.example"))
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_json(response).await["code"], "UNSUPPORTED_MEDIA_TYPE");
}

#[tokio::test]
async fn login_attempts_are_rate_limited() {
    let app = app_with_limit(1).await;
    let attempt = || {
        json(
            "POST",
            "/api/auth/login",
            json!({ "email": "", "password": "" }),
            None,
        )
    };

    let first = app.router.clone().oneshot(attempt()).await.unwrap();
    assert_eq!(first.status(), StatusCode::BAD_REQUEST);

    let second = app.router.oneshot(attempt()).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_json(second).await["code"], "RATE_LIMITED");
}
