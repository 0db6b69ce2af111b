//! Mapping from [`ScoutError`] to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use scout_shared::ScoutError;

/// A [`ScoutError`] on its way out as an HTTP response.
///
/// Bodies are fixed strings; error detail goes to the log, not the caller.
#[derive(Debug)]
pub struct ApiError(pub ScoutError);

impl From<ScoutError> for ApiError {
    fn from(err: ScoutError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ScoutError::Validation { .. } => StatusCode::BAD_REQUEST,
            ScoutError::Fetch { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match &self.0 {
            ScoutError::Validation { .. } => "Missing or invalid 'url' in request body".into(),
            ScoutError::Fetch {
                status: Some(status),
                ..
            } => format!("Failed to fetch URL (status {status})"),
            ScoutError::Fetch { status: None, .. } => "Failed to fetch URL".into(),
            _ => "Internal error while enriching website".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match status {
            StatusCode::INTERNAL_SERVER_ERROR => error!(error = %self.0, "enrichment error"),
            StatusCode::BAD_GATEWAY => warn!(error = %self.0, "upstream fetch failed"),
            _ => {}
        }

        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
