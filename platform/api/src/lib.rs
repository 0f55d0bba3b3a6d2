pub mod hal;
pub mod validation;

use std::sync::Arc;

use http::StatusCode;
use thiserror::Error;

pub use hal::{CollectionModel, Link, LinkBuilder, Links, RepresentationModel};
pub use validation::{FieldError, ValidationErrors};

/// Shared result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("Could not find employee {0}")]
    EmployeeNotFound(i64),
    #[error(transparent)]
    ValidationFailed(ValidationErrors),
    #[error(transparent)]
    Malformed(MalformedRequest),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

/// Requests rejected before any handler logic runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedRequest {
    #[error("Failed to convert value '{value}' to required type '{expected}' for parameter '{parameter}'")]
    InvalidPathParameter {
        parameter: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("Required request body is missing")]
    MissingBody,
    #[error("JSON parse error: {0}")]
    UnreadableBody(String),
    #[error("Content type '{0}' not supported")]
    UnsupportedContentType(String),
    #[error("Request method '{0}' not supported")]
    MethodNotAllowed(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::Malformed(MalformedRequest::MethodNotAllowed(_)) => {
                StatusCode::METHOD_NOT_ALLOWED
            }
            ApiError::Malformed(MalformedRequest::UnsupportedContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::Malformed(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::EmployeeNotFound(_) => "NOT_FOUND",
            ApiError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApiError::Malformed(MalformedRequest::MethodNotAllowed(_)) => "METHOD_NOT_ALLOWED",
            ApiError::Malformed(MalformedRequest::UnsupportedContentType(_)) => {
                "UNSUPPORTED_MEDIA_TYPE"
            }
            ApiError::Malformed(_) => "BAD_REQUEST",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(value: ValidationErrors) -> Self {
        Self::ValidationFailed(value)
    }
}

impl From<MalformedRequest> for ApiError {
    fn from(value: MalformedRequest) -> Self {
        Self::Malformed(value)
    }
}
