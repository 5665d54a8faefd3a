use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API-level error taxonomy.
///
/// Ownership mismatches are reported as `NotFound`; the API never confirms
/// that a row exists under another owner.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,
    #[error("{message}")]
    Validation { field: String, message: String },
    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        // A unique-constraint violation on a nested create or rename is a
        // caller error, not a server fault
        if let Some(sqlx::Error::Database(db_err)) = err.downcast_ref::<sqlx::Error>() {
            if db_err.is_unique_violation() {
                return ApiError::validation("name", "value already exists for this user");
            }
        }

        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(err) => {
                tracing::error!("Internal error handling request: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            ApiError::Validation { field, message } => Json(json!({
                "error": "Validation failed",
                "field": field,
                "message": message,
            })),
            _ => Json(json!({
                "error": self.to_string(),
                "message": self.to_string(),
            })),
        };

        (status, body).into_response()
    }
}
