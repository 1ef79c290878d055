//! # kds-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **intake endpoint** `POST /order` that turns a JSON payload
//!   into an order on the board
//! - Serve a **JSON API** for the projected board, single orders, removal
//!   and a server-sent-events stream of board updates (`/api/orders/...`)
//! - Serve a **server-side-rendered HTML board** where double-clicking a
//!   ticket dismisses it
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `kds-app` (for port traits, services and the removal trigger)
//! and `kds-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod intake;
pub mod router;
pub mod state;
