//! # kds-adapter-storage-memory
//!
//! Process-memory implementation of the [`OrderStore`](kds_app::ports::OrderStore) port.
//!
//! ## Responsibilities
//! - Hold the active orders in insertion order
//! - Serialize every mutation behind one lock
//! - Hand out copies of the board, never a live reference
//!
//! Nothing is persisted: a restart starts from an empty board.
//!
//! ## Dependency rule
//! Depends on `kds-app` (for port traits) and `kds-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod order_store;

pub use order_store::InMemoryOrderStore;
