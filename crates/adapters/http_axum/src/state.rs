//! Shared application state for axum handlers.

use std::sync::Arc;

use kds_app::board_bus::InProcessBoardBus;
use kds_app::ports::{BoardPublisher, OrderStore};
use kds_app::removal::RemovalTrigger;
use kds_app::services::order_service::OrderService;

/// Application state shared across all axum handlers.
///
/// Generic over the order store and board publisher to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<S, P> {
    /// Intake, lookup and projection of orders.
    pub order_service: Arc<OrderService<S, P>>,
    /// Funnel for dismissals, served by the removal worker.
    pub removal: RemovalTrigger,
    /// Board bus the SSE stream subscribes to.
    pub board_bus: Arc<InProcessBoardBus>,
}

impl<S, P> Clone for AppState<S, P> {
    fn clone(&self) -> Self {
        Self {
            order_service: Arc::clone(&self.order_service),
            removal: self.removal.clone(),
            board_bus: Arc::clone(&self.board_bus),
        }
    }
}

impl<S, P> AppState<S, P>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    /// Create the state from services already shared with background tasks.
    pub fn new(
        order_service: Arc<OrderService<S, P>>,
        removal: RemovalTrigger,
        board_bus: Arc<InProcessBoardBus>,
    ) -> Self {
        Self {
            order_service,
            removal,
            board_bus,
        }
    }
}
