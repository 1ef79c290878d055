//! JSON handlers for the board and single orders.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use kds_app::ports::{BoardPublisher, OrderStore};
use kds_domain::order::Order;
use kds_domain::projection::BoardView;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<BoardView>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Order>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/orders`: the projected board.
pub async fn list<S, P>(State(state): State<AppState<S, P>>) -> Result<ListResponse, ApiError>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    let board = state.order_service.board().await?;
    Ok(ListResponse::Ok(Json(board)))
}

/// `GET /api/orders/{id}`: one order as stored.
pub async fn get<S, P>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    let order_id = ApiError::parse_order_id(&id)?;
    let order = state.order_service.get_order(order_id).await?;
    Ok(GetResponse::Ok(Json(order)))
}

/// `DELETE /api/orders/{id}`: dismiss an order.
///
/// Answers 204 whether or not the order was still on the board.
pub async fn delete<S, P>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    let order_id = ApiError::parse_order_id(&id)?;
    state.removal.remove(order_id).await?;
    Ok(DeleteResponse::NoContent)
}
