use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use horizon_core::{ErrorKind, LedgerError};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let msg = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => AppError::NotFoundError(msg),
            ErrorKind::Unauthorized => AppError::AuthorizationError(msg),
            ErrorKind::CapacityExceeded | ErrorKind::Conflict => AppError::ConflictError(msg),
            ErrorKind::Invalid => AppError::ValidationError(msg),
            ErrorKind::Storage => AppError::InternalServerError(msg),
        }
    }
}
