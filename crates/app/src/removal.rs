//! Removal trigger: the funnel through which displays dismiss orders.
//!
//! Display surfaces never touch the store themselves. They hold a cloneable
//! [`RemovalTrigger`] and send `RemoveOrder` commands to a single
//! [`RemovalWorker`], which applies them one at a time and answers each.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use kds_domain::error::KdsError;
use kds_domain::id::OrderId;
use kds_domain::order::Order;

use crate::ports::{BoardPublisher, OrderStore};
use crate::services::order_service::OrderService;

type Reply = oneshot::Sender<Result<Option<Order>, KdsError>>;

/// A command addressed to the removal worker.
#[derive(Debug)]
pub enum RemovalCommand {
    /// Dismiss one order. Dismissing an order that is already gone is a no-op.
    RemoveOrder { id: OrderId, reply: Reply },
}

/// Handle used by display surfaces to dismiss orders.
#[derive(Debug, Clone)]
pub struct RemovalTrigger {
    sender: mpsc::Sender<RemovalCommand>,
}

impl RemovalTrigger {
    /// Ask the worker to remove `id` and wait for the outcome.
    ///
    /// Resolves to the removed order, or `None` when it had already left
    /// the board.
    ///
    /// # Errors
    ///
    /// Returns [`KdsError::WorkerUnavailable`] if the worker has stopped, or
    /// the error the worker hit while removing.
    pub async fn remove(&self, id: OrderId) -> Result<Option<Order>, KdsError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(RemovalCommand::RemoveOrder { id, reply })
            .await
            .map_err(|_| KdsError::WorkerUnavailable)?;
        response.await.map_err(|_| KdsError::WorkerUnavailable)?
    }
}

/// Applies removal commands against the order service, in arrival order.
pub struct RemovalWorker<S, P> {
    receiver: mpsc::Receiver<RemovalCommand>,
    service: Arc<OrderService<S, P>>,
}

/// Create a trigger and the worker that serves it.
///
/// The worker must be spawned (`tokio::spawn(worker.run())`) for triggers to
/// make progress. It stops once every trigger has been dropped.
pub fn removal_channel<S, P>(
    service: Arc<OrderService<S, P>>,
    capacity: usize,
) -> (RemovalTrigger, RemovalWorker<S, P>) {
    let (sender, receiver) = mpsc::channel(capacity);
    (RemovalTrigger { sender }, RemovalWorker { receiver, service })
}

impl<S, P> RemovalWorker<S, P>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    /// Serve commands until every trigger is dropped.
    pub async fn run(mut self) {
        tracing::debug!("removal worker started");
        while let Some(command) = self.receiver.recv().await {
            match command {
                RemovalCommand::RemoveOrder { id, reply } => {
                    let outcome = self.service.remove_order(id).await;
                    if reply.send(outcome).is_err() {
                        tracing::debug!(order_id = %id, "removal requester went away");
                    }
                }
            }
        }
        tracing::debug!("removal worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::order_service::tests::make_service;

    const FRIES: &[u8] = br#"{"location":"Table 5","items":[{"type":"normal","name":"Fries"}]}"#;

    #[tokio::test]
    async fn should_remove_order_through_worker() {
        let svc = Arc::new(make_service());
        let order = svc.ingest(FRIES).await.unwrap();
        let (trigger, worker) = removal_channel(Arc::clone(&svc), 8);
        tokio::spawn(worker.run());

        let removed = trigger.remove(order.id).await.unwrap();

        assert_eq!(removed.map(|o| o.id), Some(order.id));
        assert!(svc.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_answer_none_when_triggered_twice() {
        let svc = Arc::new(make_service());
        let order = svc.ingest(FRIES).await.unwrap();
        let (trigger, worker) = removal_channel(Arc::clone(&svc), 8);
        tokio::spawn(worker.run());

        trigger.remove(order.id).await.unwrap();
        let second = trigger.remove(order.id).await.unwrap();

        assert!(second.is_none());
    }

    #[tokio::test]
    async fn should_report_unavailable_when_worker_is_gone() {
        let svc = Arc::new(make_service());
        let (trigger, worker) = removal_channel(svc, 8);
        drop(worker);

        let result = trigger.remove(OrderId::new()).await;

        assert!(matches!(result, Err(KdsError::WorkerUnavailable)));
    }
}
