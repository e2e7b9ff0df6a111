use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

// Postgres SQLSTATE codes surfaced as typed variants.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match &err {
            SqlxError::RowNotFound => RepositoryError::NotFound,
            SqlxError::Database(db_err) => {
                let detail = db_err
                    .constraint()
                    .map(str::to_string)
                    .unwrap_or_else(|| db_err.message().to_string());

                match db_err.code().as_deref() {
                    Some(UNIQUE_VIOLATION) => RepositoryError::AlreadyExists(detail),
                    Some(FOREIGN_KEY_VIOLATION) => RepositoryError::ForeignKey(detail),
                    Some(CHECK_VIOLATION) => RepositoryError::Conflict(detail),
                    _ => RepositoryError::Sqlx(err),
                }
            }
            _ => RepositoryError::Sqlx(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_becomes_not_found() {
        let err = RepositoryError::from(SqlxError::RowNotFound);
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn pool_errors_stay_database_errors() {
        let err = RepositoryError::from(SqlxError::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Sqlx(_)));
    }
}
