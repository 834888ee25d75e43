//! Contract-level error type.
//!
//! The base contract defines exactly one failure kind of its own:
//! `Unauthorized`, returned by every authentication hook a concrete
//! connector has not overridden. Anything else a connector can fail with
//! is implementation-defined and travels through the `Other` variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

/// Error returned by connector hooks.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The fixed authorization-failure shape. Every non-overridden auth
    /// hook produces `message = "Not Authorized"`, `code = 401`.
    #[error("{message}")]
    Unauthorized { message: String, code: u16 },

    /// Connector-specific failure from an overriding implementation.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConnectorError {
    /// The default authorization failure.
    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            message: "Not Authorized".to_string(),
            code: 401,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Wire shape: `{"message": "...", "code": ...}`.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: u16,
}

impl IntoResponse for ConnectorError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ConnectorError::Unauthorized { message, code } => (
                StatusCode::from_u16(code).unwrap_or(StatusCode::UNAUTHORIZED),
                ErrorBody { message, code },
            ),
            ConnectorError::Other(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    message: e.to_string(),
                    code: 500,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
