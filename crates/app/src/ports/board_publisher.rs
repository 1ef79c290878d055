//! Board publisher port: fan board snapshots out to display surfaces.

use std::future::Future;

use kds_domain::board::BoardSnapshot;
use kds_domain::error::KdsError;

/// Publishes every new board snapshot so displays can redraw from scratch.
pub trait BoardPublisher {
    /// Publish a snapshot to all current subscribers.
    fn publish(&self, snapshot: BoardSnapshot)
    -> impl Future<Output = Result<(), KdsError>> + Send;
}

impl<T: BoardPublisher + Send + Sync> BoardPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        snapshot: BoardSnapshot,
    ) -> impl Future<Output = Result<(), KdsError>> + Send {
        (**self).publish(snapshot)
    }
}
