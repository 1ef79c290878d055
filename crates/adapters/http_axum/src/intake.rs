//! Intake endpoint: `POST /order`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use kds_app::ports::{BoardPublisher, OrderStore};
use kds_domain::id::OrderId;

use crate::error::{ApiError, TransportError};
use crate::state::AppState;

/// Body acknowledging an accepted order.
#[derive(Serialize)]
pub struct IntakeAck {
    pub status: &'static str,
    pub id: OrderId,
}

/// Possible responses from the intake endpoint.
pub enum SubmitResponse {
    Accepted(Json<IntakeAck>),
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => json.into_response(),
        }
    }
}

/// `POST /order`
///
/// The body is read as raw bytes whatever its content type, so a payload
/// that is not JSON still gets a 400 rather than an extractor rejection.
///
/// # Errors
///
/// Responds 400 when the payload is rejected; nothing reaches the board.
pub async fn submit<S, P>(
    State(state): State<AppState<S, P>>,
    body: Bytes,
) -> Result<SubmitResponse, ApiError>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    let order = state.order_service.ingest(&body).await?;
    Ok(SubmitResponse::Accepted(Json(IntakeAck {
        status: "OK",
        id: order.id,
    })))
}

/// Any other method on `/order`.
pub async fn method_not_allowed(method: Method) -> TransportError {
    TransportError::MethodNotAllowed(method)
}
