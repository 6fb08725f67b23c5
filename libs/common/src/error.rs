//! Typed application errors and the failure responder
//!
//! The error taxonomy is a closed set: six kinds, each with a fixed HTTP
//! status. The `IntoResponse` impl at the bottom is the single place failure
//! responses are rendered — no handler writes a failure response itself.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::messages;

/// The closed set of application error kinds.
///
/// The HTTP status is a pure function of the kind; no kind may be added
/// without extending `status_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    InternalServer,
}

impl ErrorKind {
    /// HTTP status for this kind.
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Typed application error: a kind plus a client-facing message.
///
/// The kind is assigned at construction and never changes. Construction
/// never fails; the message falls back to the generic server-error string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Internal server error with the generic message.
    pub fn internal() -> Self {
        Self::new(ErrorKind::InternalServer, messages::DEFAULT_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }
}

/// Central failure responder.
///
/// Renders `{"message": …}` with the kind's status. Whenever the status is
/// 500 the message is forced to the generic server-error string, regardless
/// of what the error was constructed with.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            messages::DEFAULT_SERVER_ERROR.to_string()
        } else {
            self.message
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for handler results.
pub type AppResult<T> = Result<T, AppError>;
