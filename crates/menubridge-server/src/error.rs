//! Translation of service failures into the HTTP error shape
//! `{code, message, details?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use menubridge_square::SquareError;
use serde::Serialize;

use crate::service::ServiceError;

pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SQUARE_API_ERROR: &str = "SQUARE_API_ERROR";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// A failure on its way out of a handler.
///
/// `source` keeps the original error text for server-side logging only; it
/// is never serialized to the client.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
    pub source: Option<String>,
}

/// Attached to error responses so the request logger can report the failure
/// with method and path.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub body: ErrorBody,
    pub source: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<Vec<String>>,
    ) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.into(),
                message: message.into(),
                details,
            },
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, BAD_REQUEST, message, None)
    }

    /// Generic 500 that hides `source` from the client.
    pub fn internal(source: &dyn std::error::Error) -> Self {
        Self {
            source: Some(error_chain(source)),
            ..Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR,
                "Unexpected server error",
                None,
            )
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::InvalidArgument(message) => Self::bad_request(message),
            ServiceError::Square(square) => Self::from(square),
        }
    }
}

impl From<SquareError> for ApiError {
    fn from(error: SquareError) -> Self {
        match error {
            SquareError::MissingAccessToken => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                CONFIG_ERROR,
                SquareError::MissingAccessToken.to_string(),
                None,
            ),
            SquareError::RequestFailed {
                status, details, ..
            } => Self::new(
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                SQUARE_API_ERROR,
                "Square API request failed",
                details,
            ),
            other => Self::internal(&other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(&self.body)).into_response();
        response.extensions_mut().insert(ErrorReport {
            body: self.body,
            source: self.source,
        });
        response
    }
}

/// Renders an error with its `source()` chain, outermost first.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}
