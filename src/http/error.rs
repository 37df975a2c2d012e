//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// Failure envelope body: `{ "status": "fail", "message": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailBody {
    pub status: String,
    /// Human-readable error message
    pub message: String,
}

impl FailBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "fail".to_string(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, FailBody::new(msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, FailBody::new(msg)),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, FailBody::new(msg)),
            AppError::Repository(e) => {
                let status = match &e {
                    RepositoryError::NotFound { .. } => StatusCode::NOT_FOUND,
                    RepositoryError::Validation { .. } | RepositoryError::Query { .. } => {
                        StatusCode::BAD_REQUEST
                    }
                    RepositoryError::Configuration { .. } | RepositoryError::Internal { .. } => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, FailBody::new(e.to_string()))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
