use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to the wire envelope.
///
/// Every category except `Unauthorized` is surfaced as HTTP 200 with an
/// `{"status":"Error","error":...}` body; authorization failures use 401 with
/// the same body. Callers log the underlying cause before constructing a
/// variant; the message carried here is what the client sees.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("user not found")]
    UserNotFound,

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Storage(String),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

/// JSON error envelope body.
#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::OK,
        };
        let body = ErrorBody {
            status: "Error",
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
