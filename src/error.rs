//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid database url: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Path entity is absent. Rendered as `{"error": msg}`.
    #[error("{0}")]
    NotFound(String),
    /// An id referenced from a request body is absent. Rendered as `{"errors": [msg]}`.
    #[error("{0}")]
    MissingReference(String),
    #[error("validation: {}", .0.join(", "))]
    Validation(Vec<String>),
    /// A write failed and its transaction was rolled back.
    #[error("{context}: {source}")]
    Persistence {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    pub fn persistence(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| AppError::Persistence { context, source }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::MissingReference(msg) => (StatusCode::NOT_FOUND, json!({ "errors": [msg] })),
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            AppError::Persistence { context, source } => {
                tracing::error!(error = %source, "{}", context);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": context, "details": source.to_string() }),
                )
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database error", "details": e.to_string() }),
                )
            }
            AppError::Config(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Configuration error", "details": e.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
