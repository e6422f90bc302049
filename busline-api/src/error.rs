use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use busline_core::CoreError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFoundError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Core(err) => {
                let message = err.to_string();
                match err {
                    CoreError::Validation { field, .. } => (
                        StatusCode::BAD_REQUEST,
                        json!({ "success": false, "error": message, "field": field }),
                    ),
                    CoreError::NotFound { .. } => (
                        StatusCode::NOT_FOUND,
                        json!({ "success": false, "error": message }),
                    ),
                    CoreError::Capacity { available, .. } => (
                        StatusCode::BAD_REQUEST,
                        json!({ "success": false, "error": message, "available": available }),
                    ),
                }
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": msg }),
            ),
            AppError::NotFoundError(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "error": msg }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

// Non-numeric bus ids and malformed booking ids cannot name anything
impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::NotFoundError("Resource not found".to_string())
    }
}
