//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::analytics::{AnalyticsError, ExportError};
use crate::pipeline::PipelineError;
use crate::queue::QueueError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            PipelineError::Queue(q) => ApiError::Queue(q),
        }
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(e: AnalyticsError) -> Self {
        ApiError::InvalidInput(e.to_string())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Queue(QueueError::ItemNotFound(_)) => StatusCode::NOT_FOUND,
            // State-machine violations: the caller must re-fetch and retry.
            ApiError::Queue(_) => StatusCode::CONFLICT,
            ApiError::Export(ExportError::UnknownFormat(_)) => StatusCode::BAD_REQUEST,
            ApiError::Export(ExportError::Window(_)) => StatusCode::BAD_REQUEST,
            ApiError::Export(ExportError::Serialize(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Unauthorized => "unauthorized",
            ApiError::Queue(QueueError::ItemNotFound(_)) => "item_not_found",
            ApiError::Queue(QueueError::AlreadyAssigned { .. }) => "already_assigned",
            ApiError::Queue(QueueError::NotAssignedToCaller { .. }) => "not_assigned_to_caller",
            ApiError::Queue(QueueError::AlreadyDecided { .. }) => "already_decided",
            ApiError::Queue(QueueError::BelowQueueThreshold) => "below_queue_threshold",
            ApiError::Export(_) => "export_failure",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        }));
        (status, body).into_response()
    }
}
