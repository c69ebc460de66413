//! Request-level error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that end a request with a non-2xx response.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The toolchain exited non-zero; the body carries its own diagnostics.
    #[error("{0}")]
    Toolchain(String),

    /// An I/O failure other than a missing file.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Missing file, answered with the stock empty 404.
    #[error("not found")]
    NotFound,
}

impl ServeError {
    /// Maps a filesystem error: missing paths become 404, everything else
    /// surfaces as a server error with the OS error text.
    pub fn from_fs(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => Self::NotFound,
            _ => Self::Io(err),
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Toolchain(diagnostics) => {
                (StatusCode::INTERNAL_SERVER_ERROR, diagnostics).into_response()
            }
            Self::Io(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}
