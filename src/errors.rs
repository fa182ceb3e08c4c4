use crate::{
    services::{intake_service::IntakeError, qr_service::QrError, storage_service::StorageError},
    views::pages,
};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

/// A lightweight wrapper for general errors that keeps the message local.
///
/// The message is only ever logged; every variant renders the same static
/// error page.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "Upload error: {}", self.message);
        } else {
            tracing::warn!(status = %self.status, "Rejected upload: {}", self.message);
        }

        (self.status, Html(pages::error_page())).into_response()
    }
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        let status = match &err {
            IntakeError::MissingFile | IntakeError::Malformed(_) => StatusCode::BAD_REQUEST,
            IntakeError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            IntakeError::Multipart { status, .. } => *status,
            IntakeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError::new(status, err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<QrError> for AppError {
    fn from(err: QrError) -> Self {
        AppError::internal(err.to_string())
    }
}
