use axum::{
    Extension,
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};
use shared::{abstract_trait::DynRateLimiter, errors::HttpError};
use std::net::SocketAddr;
use tracing::warn;

/// Attempts per client and route within one window.
pub const AUTH_MAX_REQUESTS: i64 = 10;
pub const AUTH_WINDOW_SECONDS: i64 = 60;

fn client_ip(req: &Request<Body>) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    Extension(rate_limiter): Extension<DynRateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let ip = client_ip(&req);
    let key = format!("rate_limit:{}:{ip}", req.uri().path());

    let (allowed, current) = rate_limiter
        .check_rate_limit(&key, AUTH_MAX_REQUESTS, AUTH_WINDOW_SECONDS)
        .await;

    if !allowed {
        warn!("🚫 Rate limit exceeded for IP: {ip} (requests: {current})");
        return Err(HttpError::TooManyRequests(
            "Too many requests, please try again later".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarded_header_wins_over_socket() {
        let req = Request::builder()
            .uri("/api/auth/login")
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn missing_address_is_unknown() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(client_ip(&req), "unknown");
    }
}
