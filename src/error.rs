use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Every failure a handler can produce. Each variant maps to one HTTP status
/// and serializes as `{"errorType": ..., "message": ...}`.
///
/// `NotFound` and `Store` are deliberately separate variants so callers can
/// never confuse "the record is absent" with "the write failed".
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Too many failed login attempts")]
    TooManyAttempts,
    #[error("Wrong email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("Email is already registered")]
    EmailTaken,
    #[error("storage operation failed")]
    Store(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::TooManyAttempts => StatusCode::FORBIDDEN,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::EmailTaken => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::EmailTaken => "EMAIL_ALREADY_TAKEN",
            ApiError::Store(_) => "STORE_FAILURE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Server-side failures get logged with their cause and answered with
        // a generic message; everything else reports its own text.
        let message = match &self {
            ApiError::Store(e) => {
                error!(error = %e, "store failure");
                "Internal server error".to_string()
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            self.status(),
            Json(json!({
                "errorType": self.error_type(),
                "message": message,
            })),
        )
            .into_response()
    }
}
