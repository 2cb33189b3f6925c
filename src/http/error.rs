//! Mapping of course errors to HTTP responses.
//!
//! Error bodies are `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::courses::CourseError;

impl CourseError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CourseError::NotFound(_) => StatusCode::NOT_FOUND,
            CourseError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CourseError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Course operation failed");
        } else {
            tracing::debug!(error = %self, "Course operation rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
