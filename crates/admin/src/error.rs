//! Unified error handling for admin.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ShippingMethodError;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shipping method operation failed.
    #[error("{0}")]
    ShippingMethod(#[from] ShippingMethodError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON body sent for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl AppError {
    /// Whether this error is the server's fault rather than the client's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::ShippingMethod(ShippingMethodError::Store(_)))
    }

    /// HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::ShippingMethod(ShippingMethodError::Store(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::ShippingMethod(
                ShippingMethodError::InvalidIdentifier(_) | ShippingMethodError::EmptyUpdate,
            )
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Malformed or non-object request bodies get the same JSON error shape as
/// every other client error.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(ErrorBody {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
