//! In-memory implementation of [`OrderStore`].

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use kds_app::ports::{OrderStore, RemoveOutcome};
use kds_domain::board::BoardSnapshot;
use kds_domain::error::KdsError;
use kds_domain::id::OrderId;
use kds_domain::order::Order;

/// Mutex-guarded board.
///
/// The lock is never held across an `.await`; each method does its work
/// synchronously and returns a ready future.
#[derive(Default)]
pub struct InMemoryOrderStore {
    board: Mutex<BoardSnapshot>,
}

impl InMemoryOrderStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BoardSnapshot> {
        // Every mutation leaves the board consistent before it can panic.
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OrderStore for InMemoryOrderStore {
    fn append(
        &self,
        order: Order,
    ) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send {
        let mut board = self.lock();
        board.orders.push(order);
        board.revision += 1;
        let snapshot = board.clone();
        async { Ok(snapshot) }
    }

    fn replace_all(
        &self,
        order: Order,
    ) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send {
        let mut board = self.lock();
        let cleared = board.orders.len();
        board.orders.clear();
        board.orders.push(order);
        board.revision += 1;
        tracing::debug!(cleared, revision = board.revision, "board replaced");
        let snapshot = board.clone();
        async { Ok(snapshot) }
    }

    fn remove(&self, id: OrderId) -> impl Future<Output = Result<RemoveOutcome, KdsError>> + Send {
        let mut board = self.lock();
        let position = board.orders.iter().position(|order| order.id == id);
        let removed = match position {
            Some(index) => {
                board.revision += 1;
                Some(board.orders.remove(index))
            }
            None => None,
        };
        let snapshot = board.clone();
        async { Ok(RemoveOutcome { removed, snapshot }) }
    }

    fn get_by_id(
        &self,
        id: OrderId,
    ) -> impl Future<Output = Result<Option<Order>, KdsError>> + Send {
        let found = self.lock().orders.iter().find(|order| order.id == id).cloned();
        async { Ok(found) }
    }

    fn snapshot(&self) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send {
        let snapshot = self.lock().clone();
        async { Ok(snapshot) }
    }
}
