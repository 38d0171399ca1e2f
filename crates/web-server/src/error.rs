use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

use crate::response::PrettyJson;

/// The message every rejected write reports, whatever the underlying cause.
pub const VALIDATION_ERRORS: &str = "validation errors";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Maps the failure of a create or update. A missing target is still a
    /// 404; anything else (bad field, dangling foreign key, database error)
    /// collapses into the generic 400.
    pub fn from_mutation(err: DbError, entity: &str) -> Self {
        match err {
            DbError::NotFound => Self::not_found(entity),
            other => Self::Validation(other.to_string()),
        }
    }

    /// Maps the failure of a read or delete.
    pub fn from_lookup(err: DbError, entity: &str) -> Self {
        match err {
            DbError::NotFound => Self::not_found(entity),
            other => Self::Database(other),
        }
    }

    pub(crate) fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{entity} not found"))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    PrettyJson(json!({ "error": "An internal database error occurred" })),
                )
                    .into_response()
            }
            AppError::Validation(cause) => {
                tracing::warn!(%cause, "Rejected write.");
                (
                    StatusCode::BAD_REQUEST,
                    PrettyJson(json!({ "errors": [VALIDATION_ERRORS] })),
                )
                    .into_response()
            }
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, PrettyJson(json!({ "error": message }))).into_response()
            }
        }
    }
}
