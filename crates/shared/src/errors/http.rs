use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    InvalidCredentials,
    NotApproved,
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InvalidTransition(String),
    InsufficientStock(String),
    TooManyRequests(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl HttpError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            HttpError::BadRequest(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            HttpError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            HttpError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            HttpError::NotApproved => (StatusCode::FORBIDDEN, "ACCOUNT_NOT_APPROVED"),
            HttpError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            HttpError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            HttpError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            HttpError::InvalidTransition(_) => {
                (StatusCode::CONFLICT, "INVALID_STATUS_TRANSITION")
            }
            HttpError::InsufficientStock(_) => (StatusCode::CONFLICT, "INSUFFICIENT_STOCK"),
            HttpError::TooManyRequests(_) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            HttpError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            HttpError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn message(self) -> String {
        match self {
            HttpError::InvalidCredentials => "Invalid email or password".to_string(),
            HttpError::NotApproved => {
                "Your account is awaiting approval by an administrator".to_string()
            }
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::Forbidden(msg)
            | HttpError::NotFound(msg)
            | HttpError::Conflict(msg)
            | HttpError::InvalidTransition(msg)
            | HttpError::InsufficientStock(msg)
            | HttpError::TooManyRequests(msg)
            | HttpError::ServiceUnavailable(msg)
            | HttpError::Internal(msg) => msg,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => HttpError::InvalidCredentials,

            ServiceError::NotApproved => HttpError::NotApproved,

            ServiceError::Unauthorized(msg) => HttpError::Unauthorized(msg),

            ServiceError::Forbidden(msg) => HttpError::Forbidden(msg),

            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),

            ServiceError::NotFound(what) => HttpError::NotFound(format!("{what} not found")),

            ServiceError::Conflict(msg) => HttpError::Conflict(msg),

            ServiceError::InvalidTransition { from, to } => HttpError::InvalidTransition(
                format!("Order cannot move from '{from}' to '{to}'"),
            ),

            ServiceError::InsufficientStock(msg) => HttpError::InsufficientStock(msg),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
                RepositoryError::AlreadyExists(msg) => {
                    HttpError::Conflict(format!("Already exists: {msg}"))
                }
                RepositoryError::InsufficientStock(msg) => HttpError::InsufficientStock(msg),
                RepositoryError::ForeignKey(msg) => {
                    HttpError::BadRequest(format!("Referenced record does not exist: {msg}"))
                }
                other => {
                    error!("❌ Repository failure: {other:?}");
                    HttpError::Internal("Repository error".into())
                }
            },

            ServiceError::Kafka(err) => {
                error!("❌ Kafka failure: {err}");
                HttpError::ServiceUnavailable("Messaging is unavailable".into())
            }

            ServiceError::Bcrypt(err) => {
                error!("❌ Bcrypt failure: {err}");
                HttpError::Internal("Internal authentication error".into())
            }

            ServiceError::Internal(msg) | ServiceError::Custom(msg) => {
                error!("❌ Internal failure: {msg}");
                HttpError::Internal("Internal server error".into())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = Json(ErrorResponse::new(code, self.message()));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_approved_maps_to_forbidden_with_code() {
        let err = HttpError::from(ServiceError::NotApproved);
        assert_eq!(
            err.status_and_code(),
            (StatusCode::FORBIDDEN, "ACCOUNT_NOT_APPROVED")
        );
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::AlreadyExists(
            "users_email_key".into(),
        )));
        assert_eq!(err.status_and_code().0, StatusCode::CONFLICT);
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let err = HttpError::from(ServiceError::Internal("db password is hunter2".into()));
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn invalid_transition_has_its_own_code() {
        let err = HttpError::from(ServiceError::InvalidTransition {
            from: "approved".into(),
            to: "declined".into(),
        });
        assert_eq!(
            err.status_and_code(),
            (StatusCode::CONFLICT, "INVALID_STATUS_TRANSITION")
        );
    }
}
