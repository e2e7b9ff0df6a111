use axum::{
    Extension,
    body::Body,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Duration;
use shared::{
    abstract_trait::DynSessionStore, config::SessionConfig, domain::session::Session,
    errors::HttpError,
};
use tracing::warn;

pub const SESSION_COOKIE: &str = "medsupply_sid";

/// Id of the logged-in doctor, inserted by [`require_doctor`].
#[derive(Debug, Clone, Copy)]
pub struct DoctorId(pub i32);

pub fn session_cookie(session_id: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

async fn authenticate(
    jar: &CookieJar,
    sessions: &DynSessionStore,
    config: &SessionConfig,
) -> Result<Session, HttpError> {
    let id = session_id(jar)
        .ok_or_else(|| HttpError::Unauthorized("You are not logged in".to_string()))?;

    let session = sessions
        .get_session(&id)
        .await
        .ok_or_else(|| HttpError::Unauthorized("Session expired or not found".to_string()))?;

    sessions
        .refresh_session(&session, Duration::hours(config.ttl_hours))
        .await;

    Ok(session)
}

pub async fn require_session(
    cookie_jar: CookieJar,
    Extension(sessions): Extension<DynSessionStore>,
    Extension(config): Extension<SessionConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let session = authenticate(&cookie_jar, &sessions, &config).await?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

pub async fn require_doctor(
    cookie_jar: CookieJar,
    Extension(sessions): Extension<DynSessionStore>,
    Extension(config): Extension<SessionConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let session = authenticate(&cookie_jar, &sessions, &config).await?;

    let Some(user_id) = session.doctor_id() else {
        warn!("⚠️ Admin session tried a doctor route: {}", req.uri().path());
        return Err(HttpError::Forbidden(
            "A doctor account is required".to_string(),
        ));
    };

    req.extensions_mut().insert(DoctorId(user_id));
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

pub async fn require_admin(
    cookie_jar: CookieJar,
    Extension(sessions): Extension<DynSessionStore>,
    Extension(config): Extension<SessionConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let session = authenticate(&cookie_jar, &sessions, &config).await?;

    if !session.is_admin() {
        warn!("⚠️ Doctor session tried an admin route: {}", req.uri().path());
        return Err(HttpError::Forbidden(
            "Administrator access required".to_string(),
        ));
    }

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
