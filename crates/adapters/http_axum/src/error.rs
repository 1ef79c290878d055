//! HTTP error response mapping.

use axum::Json;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use kds_domain::error::KdsError;
use kds_domain::id::OrderId;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps application failures to an HTTP response with the right status code.
#[derive(Debug)]
pub enum ApiError {
    /// An error raised by the application or domain layer.
    Kds(KdsError),
    /// A path segment that is not an order id.
    InvalidOrderId(String),
}

impl ApiError {
    /// Parse an order id taken from the request path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidOrderId`] when `raw` is not a UUID.
    pub fn parse_order_id(raw: &str) -> Result<OrderId, Self> {
        raw.parse()
            .map_err(|_| Self::InvalidOrderId(raw.to_string()))
    }
}

impl From<KdsError> for ApiError {
    fn from(err: KdsError) -> Self {
        Self::Kds(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Kds(KdsError::Malformed(err)) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Kds(KdsError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Kds(err @ KdsError::WorkerUnavailable) => {
                tracing::error!(error = %err, "cannot serve removal");
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            Self::InvalidOrderId(raw) => (
                StatusCode::BAD_REQUEST,
                format!("`{raw}` is not a valid order id"),
            ),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Request rejected before reaching the application layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("method {0} not allowed on the intake route")]
    MethodNotAllowed(Method),
}

impl IntoResponse for TransportError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "rejected intake request");
        match self {
            Self::MethodNotAllowed(_) => {
                (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "POST")]).into_response()
            }
        }
    }
}
