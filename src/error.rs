// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with.
/// The `Display` text is the `{"error": ...}` body, except for 500s.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InternalServerError(String),

    #[error("{0}")]
    BadRequest(String),

    /// A `hand_tiles` / `dora_tiles` string that is not a JSON array of ids.
    #[error("{field} must be a JSON array of tile ids: {source}")]
    MalformedTiles {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    AuthError(String),

    // e.g. voting on behalf of another user
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    // e.g. duplicate username
    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl AppError {
    pub fn malformed_tiles(field: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| AppError::MalformedTiles { field, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InternalServerError(_) | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadRequest(_) | AppError::MalformedTiles { .. } | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = if status.is_server_error() {
            tracing::error!("Internal Server Error: {}", self);
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_tiles_names_the_field() {
        let source = serde_json::from_str::<Vec<i32>>("[1,").unwrap_err();
        let err = AppError::malformed_tiles("hand_tiles")(source);

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("hand_tiles must be a JSON array"));
    }

    #[test]
    fn database_errors_are_server_errors() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
