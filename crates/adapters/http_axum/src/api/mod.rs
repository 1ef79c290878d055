//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod orders;
pub mod sse;

use axum::Router;
use axum::routing::get;

use kds_app::ports::{BoardPublisher, OrderStore};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, P>() -> Router<AppState<S, P>>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/orders", get(orders::list::<S, P>))
        .route("/orders/stream", get(sse::stream::<S, P>))
        .route(
            "/orders/{id}",
            get(orders::get::<S, P>).delete(orders::delete::<S, P>),
        )
}
