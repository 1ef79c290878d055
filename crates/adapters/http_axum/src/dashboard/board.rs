//! Dashboard page for the kitchen board.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use kds_app::ports::{BoardPublisher, OrderStore};
use kds_domain::projection::{BoardView, LineKind};

use super::REFRESH_SECONDS;
use crate::error::ApiError;
use crate::state::AppState;

/// Kitchen board template.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardPage {
    refresh_seconds: u32,
    board: BoardView,
}

impl BoardPage {
    #[must_use]
    pub fn new(board: BoardView) -> Self {
        Self {
            refresh_seconds: REFRESH_SECONDS,
            board,
        }
    }
}

impl IntoResponse for BoardPage {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Response from the dismiss form handler (PRG pattern).
pub enum DismissResponse {
    /// Redirect back to the board.
    Redirect(Redirect),
}

impl IntoResponse for DismissResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}

/// `GET /`: the kitchen board.
pub async fn index<S, P>(State(state): State<AppState<S, P>>) -> Result<BoardPage, ApiError>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    let board = state.order_service.board().await?;
    Ok(BoardPage::new(board))
}

/// `POST /orders/{id}/dismiss`: double-click dismissal (PRG).
pub async fn dismiss<S, P>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> Result<DismissResponse, ApiError>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    let order_id = ApiError::parse_order_id(&id)?;
    state.removal.remove(order_id).await?;
    Ok(DismissResponse::Redirect(Redirect::to("/")))
}
