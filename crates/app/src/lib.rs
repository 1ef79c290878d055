//! # kds-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `OrderStore`: append, replace, remove and snapshot the active orders
//!   - `BoardPublisher`: hand every fresh board snapshot to display surfaces
//! - Define **driving/inbound ports** as use-case structs:
//!   - `OrderService`: ingest a payload, remove an order, project the board
//!   - `RemovalTrigger`: the single funnel through which displays dismiss orders
//! - Provide **in-process infrastructure** (board bus, removal worker) that
//!   doesn't need IO
//!
//! ## Dependency rule
//! Depends on `kds-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod board_bus;
pub mod ports;
pub mod removal;
pub mod services;
