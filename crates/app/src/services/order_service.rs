//! Order service: intake, removal and projection of kitchen orders.

use kds_domain::board::{BoardSnapshot, IntakeMode};
use kds_domain::error::{KdsError, NotFoundError};
use kds_domain::id::OrderId;
use kds_domain::order::Order;
use kds_domain::projection::BoardView;

use crate::ports::{BoardPublisher, OrderStore, RemoveOutcome};

/// Application service owning the order lifecycle.
///
/// Every effective mutation publishes the snapshot the store returned for
/// it, so displays always redraw from a complete board.
pub struct OrderService<S, P> {
    store: S,
    publisher: P,
    mode: IntakeMode,
}

impl<S, P> OrderService<S, P>
where
    S: OrderStore,
    P: BoardPublisher,
{
    /// Create a new service that accumulates orders.
    pub fn new(store: S, publisher: P) -> Self {
        Self {
            store,
            publisher,
            mode: IntakeMode::default(),
        }
    }

    /// Choose how new orders land on the board.
    #[must_use]
    pub fn with_mode(mut self, mode: IntakeMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn mode(&self) -> IntakeMode {
        self.mode
    }

    /// Parse a raw payload and put the resulting order on the board.
    ///
    /// The payload is parsed completely before the store is touched.
    ///
    /// # Errors
    ///
    /// Returns [`KdsError::Malformed`] if the payload is rejected; the board
    /// is left unchanged in that case.
    #[tracing::instrument(skip_all, fields(bytes = payload.len()))]
    pub async fn ingest(&self, payload: &[u8]) -> Result<Order, KdsError> {
        let order = Order::from_json(payload)
            .inspect_err(|err| tracing::warn!(error = %err, "rejected order payload"))?;

        let snapshot = match self.mode {
            IntakeMode::Accumulate => self.store.append(order.clone()).await?,
            IntakeMode::ReplaceAll => self.store.replace_all(order.clone()).await?,
        };
        tracing::info!(
            order_id = %order.id,
            location = %order.location,
            items = order.items.len(),
            revision = snapshot.revision,
            "order placed on board"
        );

        self.publisher.publish(snapshot).await?;
        Ok(order)
    }

    /// Take an order off the board.
    ///
    /// Returns the removed order, or `None` when it was already gone. Only an
    /// effective removal publishes a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the store or the publisher.
    #[tracing::instrument(skip(self))]
    pub async fn remove_order(&self, id: OrderId) -> Result<Option<Order>, KdsError> {
        let RemoveOutcome { removed, snapshot } = self.store.remove(id).await?;

        match &removed {
            Some(order) => {
                tracing::info!(
                    order_id = %id,
                    location = %order.location,
                    revision = snapshot.revision,
                    "order dismissed"
                );
                self.publisher.publish(snapshot).await?;
            }
            None => tracing::debug!(order_id = %id, "order already dismissed"),
        }

        Ok(removed)
    }

    /// Look up an order still on the board.
    ///
    /// # Errors
    ///
    /// Returns [`KdsError::NotFound`] when no order with `id` is on the board.
    pub async fn get_order(&self, id: OrderId) -> Result<Order, KdsError> {
        self.store.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Order",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Copy of the current board.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the store.
    pub async fn snapshot(&self) -> Result<BoardSnapshot, KdsError> {
        self.store.snapshot().await
    }

    /// Project the current board.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the store.
    pub async fn board(&self) -> Result<BoardView, KdsError> {
        Ok(self.store.snapshot().await?.view())
    }
}
