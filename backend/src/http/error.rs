//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Nothing left to show after loading and filtering
    NoData(String),
    /// Source exists but cannot be parsed
    InvalidSource(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NoData(_) | AppError::InvalidSource(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::NotFound(msg) => ApiError::new("NOT_FOUND", msg),
            AppError::BadRequest(msg) => ApiError::new("BAD_REQUEST", msg),
            AppError::NoData(msg) => ApiError::new("NO_DATA", msg),
            AppError::InvalidSource(msg) => ApiError::new("INVALID_SOURCE", msg),
            AppError::Internal(msg) => ApiError::new("INTERNAL_ERROR", msg),
        };

        (status, Json(error)).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let msg = err.to_string();
        if err.is_not_found() {
            return AppError::NotFound(msg);
        }
        match err {
            PipelineError::Io { .. } => AppError::Internal(msg),
            PipelineError::Csv(_)
            | PipelineError::MissingColumn { .. }
            | PipelineError::InvalidTimestamp { .. } => AppError::InvalidSource(msg),
            PipelineError::NoSourceData | PipelineError::AllFilteredOut { .. } => {
                AppError::NoData(msg)
            }
        }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
