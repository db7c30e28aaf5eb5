//! HTTP error type and its JSON rendering.
//!
//! Every failure leaves the server as `{"success": false, "error": "..."}`
//! with the matching status code.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use super::types::ErrorBody;
use crate::store::StoreError;

/// Errors returned by handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid or missing API key")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(StoreError::InvalidName(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Storage details stay in the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage(err) => TransferFailure::from_store(err)
                .map_or_else(|| err.public_message(), TransferFailure::reason)
                .to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            success: false,
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Upload transfer failures with their fixed client-facing reasons.
///
/// Reading the request yields the first three. The disk-side ones come from
/// the store ([`TransferFailure::from_store`]) and keep their 500 status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFailure {
    /// The request body exceeded the server's hard body limit.
    SizeExceeded,
    /// The multipart stream ended early or was malformed.
    Partial,
    /// No `photo` file was present, or it was empty.
    NoFile,
    /// No temporary file could be created for the upload.
    NoTempStorage,
    /// The upload could not be written out.
    WriteFailure,
}

impl TransferFailure {
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::SizeExceeded => "The uploaded file exceeds the maximum request size",
            Self::Partial => "The uploaded file was only partially uploaded",
            Self::NoFile => "No file was uploaded",
            Self::NoTempStorage => "Missing a temporary folder",
            Self::WriteFailure => "Failed to write file to disk",
        }
    }

    /// Classify an error raised while reading the multipart stream.
    #[must_use]
    pub fn from_multipart(err: &MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::SizeExceeded
        } else {
            Self::Partial
        }
    }

    /// The transfer failure a store error stands for, if any.
    #[must_use]
    pub fn from_store(err: &StoreError) -> Option<Self> {
        match err {
            StoreError::TempFile { .. } => Some(Self::NoTempStorage),
            StoreError::Write(_) => Some(Self::WriteFailure),
            _ => None,
        }
    }
}

/// Request-side failures are client errors. The photo's own size check in
/// the upload handler answers 413 separately.
impl From<TransferFailure> for AppError {
    fn from(failure: TransferFailure) -> Self {
        match failure {
            TransferFailure::SizeExceeded
            | TransferFailure::Partial
            | TransferFailure::NoFile => Self::BadRequest(failure.reason().to_string()),
            TransferFailure::NoTempStorage | TransferFailure::WriteFailure => {
                Self::Internal(failure.reason().to_string())
            },
        }
    }
}
