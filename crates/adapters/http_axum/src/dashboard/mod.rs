//! Server-side rendered kitchen board.
//!
//! Every page is rendered from a fresh board projection. Each ticket is a
//! `<form>` posting to its dismiss route; double-clicking the ticket submits
//! it, and a plain button does the same without scripting. Dismissal follows
//! the POST-redirect-GET pattern.

#[allow(clippy::missing_errors_doc)]
pub mod board;

use axum::Router;
use axum::routing::{get, post};

use kds_app::ports::{BoardPublisher, OrderStore};

use crate::state::AppState;

/// Seconds between automatic reloads of the board page.
pub const REFRESH_SECONDS: u32 = 5;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<S, P>() -> Router<AppState<S, P>>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(board::index::<S, P>))
        .route("/orders/{id}/dismiss", post(board::dismiss::<S, P>))
}
