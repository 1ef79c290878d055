//! Board: the set of active orders as one immutable, revisioned snapshot.

use serde::{Deserialize, Serialize};

use crate::id::OrderId;
use crate::order::Order;
use crate::projection::{BoardView, RenderedOrder, project};

/// How a new order lands on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeMode {
    /// Every submission is appended; the board is a queue of tickets.
    #[default]
    Accumulate,
    /// Every submission clears the board first; only the newest ticket shows.
    ReplaceAll,
}

/// Copy of the board taken inside the same critical section as the
/// mutation that produced it.
///
/// `revision` grows by one per effective mutation, so a display can discard
/// a snapshot that is not newer than the one it last drew.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub revision: u64,
    pub orders: Vec<Order>,
}

impl BoardSnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: OrderId) -> bool {
        self.orders.iter().any(|order| order.id == id)
    }

    /// Project every order, in board order.
    #[must_use]
    pub fn project(&self) -> Vec<RenderedOrder> {
        project(&self.orders)
    }

    /// Project the board together with its revision.
    #[must_use]
    pub fn view(&self) -> BoardView {
        BoardView {
            revision: self.revision,
            orders: self.project(),
        }
    }

    /// Whether this snapshot should replace one drawn at `revision`.
    #[must_use]
    pub fn supersedes(&self, revision: Option<u64>) -> bool {
        revision.is_none_or(|drawn| self.revision > drawn)
    }
}
