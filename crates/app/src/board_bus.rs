//! In-process board bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use kds_domain::board::BoardSnapshot;
use kds_domain::error::KdsError;

use crate::ports::BoardPublisher;

/// In-process board bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when no display is subscribed
/// (the snapshot is simply dropped).
pub struct InProcessBoardBus {
    sender: broadcast::Sender<BoardSnapshot>,
}

impl InProcessBoardBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to board updates.
    ///
    /// Returns a receiver that will get every snapshot published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BoardSnapshot> {
        self.sender.subscribe()
    }
}

impl BoardPublisher for InProcessBoardBus {
    fn publish(
        &self,
        snapshot: BoardSnapshot,
    ) -> impl Future<Output = Result<(), KdsError>> + Send {
        let revision = snapshot.revision;
        // Fails only when nobody is listening.
        if self.sender.send(snapshot).is_err() {
            tracing::trace!(revision, "no display subscribed to board bus");
        }
        async { Ok(()) }
    }
}
