use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

/// Every failure a handler can surface. The body is always `{"detail": ...}`.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Malformed, missing or out-of-range input, rejected before the store is touched
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Uniqueness or duplicate-date violation reported by the store
    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// The cause is logged, never sent to the caller
    #[display(fmt = "Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn employee_not_found() -> Self {
        ApiError::NotFound("Employee not found".to_string())
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "detail": self.to_string()
        }))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        error!(error = %e, "Store operation failed");
        ApiError::Internal(e.to_string())
    }
}

/// True when the store rejected a write because of a UNIQUE constraint.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}
