//! Order store port: the single owner of the active orders.

use std::future::Future;

use kds_domain::board::BoardSnapshot;
use kds_domain::error::KdsError;
use kds_domain::id::OrderId;
use kds_domain::order::Order;

/// Result of a removal: the order that left (if it was still there) and the
/// board as it stands afterwards.
#[derive(Debug, Clone)]
pub struct RemoveOutcome {
    pub removed: Option<Order>,
    pub snapshot: BoardSnapshot,
}

/// Insertion-ordered store of active orders.
///
/// Implementations serialize mutations, and every mutating method returns
/// the snapshot taken inside the same critical section.
pub trait OrderStore {
    /// Add an order at the end of the board.
    fn append(&self, order: Order)
    -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send;

    /// Clear the board and leave only `order` on it, as one mutation.
    fn replace_all(
        &self,
        order: Order,
    ) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send;

    /// Remove the order with `id`. Removing an absent order is a no-op.
    fn remove(&self, id: OrderId) -> impl Future<Output = Result<RemoveOutcome, KdsError>> + Send;

    /// Get an order by id.
    fn get_by_id(
        &self,
        id: OrderId,
    ) -> impl Future<Output = Result<Option<Order>, KdsError>> + Send;

    /// Copy of the current board.
    fn snapshot(&self) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send;
}

impl<T: OrderStore + Send + Sync> OrderStore for std::sync::Arc<T> {
    fn append(
        &self,
        order: Order,
    ) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send {
        (**self).append(order)
    }

    fn replace_all(
        &self,
        order: Order,
    ) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send {
        (**self).replace_all(order)
    }

    fn remove(&self, id: OrderId) -> impl Future<Output = Result<RemoveOutcome, KdsError>> + Send {
        (**self).remove(id)
    }

    fn get_by_id(
        &self,
        id: OrderId,
    ) -> impl Future<Output = Result<Option<Order>, KdsError>> + Send {
        (**self).get_by_id(id)
    }

    fn snapshot(&self) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send {
        (**self).snapshot()
    }
}
