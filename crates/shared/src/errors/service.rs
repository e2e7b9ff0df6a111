use crate::errors::repository::RepositoryError;
use bcrypt::BcryptError;
use rdkafka::error::KafkaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Account is awaiting admin approval")]
    NotApproved,

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] BcryptError),

    #[error("Kafka error: {0}")]
    Kafka(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![message.into()])
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        ServiceError::NotFound(what.into())
    }
}

impl From<KafkaError> for ServiceError {
    fn from(error: KafkaError) -> Self {
        ServiceError::Kafka(error.to_string())
    }
}
