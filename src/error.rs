use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Message shown to callers whenever the room could not be created
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create meeting";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The conferencing server answered, but reported neither success nor an existing room
    #[error("Conferencing server rejected create: {details}")]
    CreateFailed { details: String },

    /// The conferencing server could not be reached or answered with a non-2xx status
    #[error("Conferencing server unreachable: {0}")]
    Transport(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::CreateFailed { details } | AppError::Transport(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": CREATE_FAILED_MESSAGE, "details": details }),
            ),
            AppError::InternalError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "request to conferencing server timed out".to_string()
        } else if err.is_connect() {
            "could not connect to conferencing server".to_string()
        } else if let Some(status) = err.status() {
            format!("conferencing server returned HTTP {}", status.as_u16())
        } else if err.is_body() || err.is_decode() {
            "could not read conferencing server response".to_string()
        } else {
            "request to conferencing server failed".to_string()
        };

        AppError::Transport(reason)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
