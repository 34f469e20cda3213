//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Handler error rendered as `{"error": message}`
#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    NotFound(String),
    DatabaseError(String),
    Internal(String),
}

impl From<tvs_common::Error> for ApiError {
    fn from(err: tvs_common::Error) -> Self {
        use tvs_common::Error;

        match err {
            Error::InvalidInput(msg) => ApiError::InvalidInput(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::Database(e) => ApiError::DatabaseError(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::DatabaseError(msg) => {
                error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
