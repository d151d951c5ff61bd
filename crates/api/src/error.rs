use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lyric_core::error::CoreError;
use serde_json::json;

/// Detail shown for any failure whose real cause stays in the logs.
pub const GENERIC_DETAIL: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every response has the shape `{"detail": message}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `lyric_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message, shown to the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error; the message is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Configuration(msg) => {
                    tracing::error!(error = %msg, "Service misconfigured");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Service is not configured".to_string(),
                    )
                }
                CoreError::Upstream { summary, detail } => {
                    tracing::error!(error = %detail, "{summary}");
                    (StatusCode::INTERNAL_SERVER_ERROR, summary.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_DETAIL.to_string())
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_DETAIL.to_string())
            }
        };

        (status, axum::Json(json!({ "detail": detail }))).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// Foreign-key violations (`23503`) mean the caller referenced a row that
/// does not exist and map to 400; everything else is a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some("23503") {
            return (
                StatusCode::BAD_REQUEST,
                "Referenced record does not exist".to_string(),
            );
        }
    }
    tracing::error!(error = %err, "Database error");
    (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_DETAIL.to_string())
}
