//! Crate error type with HTTP status code mapping.
//!
//! [`ChatError`] is shared by the relay and the chat widget. On the relay
//! side each variant maps to an HTTP status code and a structured JSON
//! error response; on the widget side errors are only logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// All relay error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 3002,
///     "message": "relay is full (256 clients)"
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Error enum for connection, storage, configuration and relay failures.
///
/// # Error Code Ranges
///
/// | Range     | Category      | HTTP Status               |
/// |-----------|---------------|---------------------------|
/// | 1000–1999 | Validation    | 400 Bad Request           |
/// | 2000–2999 | Transport     | 502 Bad Gateway           |
/// | 3000–3999 | Server        | 500 / 503                 |
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The connection task has ended; nothing more can be sent.
    #[error("transport closed")]
    TransportClosed,

    /// I/O failure (terminal, stdin, sockets).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing the persisted display name failed.
    #[error("name store error: {0}")]
    NameStore(String),

    /// A display name was empty after trimming.
    #[error("invalid display name: {0:?}")]
    InvalidName(String),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The relay refused a connection because it is at capacity.
    #[error("relay is full ({max_clients} clients)")]
    RelayFull {
        /// Configured connection limit.
        max_clients: usize,
    },

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidName(_) => 1001,
            Self::Config(_) => 1002,
            Self::TransportClosed => 2001,
            Self::Internal(_) => 3000,
            Self::Io(_) => 3001,
            Self::RelayFull { .. } => 3002,
            Self::NameStore(_) => 3003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidName(_) | Self::Config(_) => StatusCode::BAD_REQUEST,
            Self::TransportClosed => StatusCode::BAD_GATEWAY,
            Self::RelayFull { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Io(_) | Self::NameStore(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::NameStore(err.to_string())
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
