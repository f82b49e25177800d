use axum::{http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerErrorKind {
    Validation,
    BadRequest,
    NotFound,
    Internal,
    UpstreamUnavailable,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::UpstreamUnavailable => "UpstreamUnavailable",
        };
        write!(f, "{}", s)
    }
}

/// Error surfaced from a handler. The response body always has the
/// `{success: false, message}` shape the clients expect; internal detail
/// stays in the logs, never in the body.
#[derive(Debug)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
}

impl HandlerError {
    pub fn validation(message: impl Into<String>) -> Self {
        HandlerError { error: HandlerErrorKind::Validation, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HandlerError { error: HandlerErrorKind::BadRequest, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        HandlerError { error: HandlerErrorKind::Internal, message: message.into() }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        HandlerError { error: HandlerErrorKind::UpstreamUnavailable, message: message.into() }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            HandlerErrorKind::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        };
        let body = axum::Json(ErrorBody { success: false, message: self.message });
        (status, body).into_response()
    }
}

#[derive(Debug, Clone)]
pub enum ServiceError {
    InvalidInput(String),
    InternalError(String),
    Upstream(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            ServiceError::Upstream(msg) => write!(f, "Upstream Error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_to_status() {
        let err = HandlerError::upstream("upstream rejected the request");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = HandlerError::validation("email is invalid");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
