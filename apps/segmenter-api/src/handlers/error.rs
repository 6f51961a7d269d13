//! Mapping of domain errors onto HTTP responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use segmenter_domain::segment::{ErrorKind, SegmentError};

use crate::dto::ErrorResponse;

/// Generic text returned for internal failures; the real cause stays in the logs
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                error: message.into(),
                slugs: Vec::new(),
                missing: None,
            },
        }
    }

    /// 500 with the generic message, for failures that never became a `SegmentError`
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorResponse {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                slugs: Vec::new(),
                missing: None,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// HTTP status for each error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<SegmentError> for ApiError {
    fn from(err: SegmentError) -> Self {
        let kind = err.kind();
        let error = match kind {
            ErrorKind::Internal => INTERNAL_ERROR_MESSAGE.to_string(),
            _ => err.to_string(),
        };

        Self {
            status: status_for(kind),
            body: ErrorResponse {
                error,
                slugs: err.conflicting_slugs().into_iter().map(String::from).collect(),
                missing: err.missing_count(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
