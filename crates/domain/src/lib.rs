//! # kds-domain
//!
//! Pure domain model for the kitchen display system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Items** (plain lines and composite bundles with counted components)
//! - Define **Orders** (one kitchen ticket for a location) and parse them from
//!   inbound JSON payloads
//! - Define the **Board** (an immutable, revisioned snapshot of active orders)
//! - **Project** the board into the text lines a display surface draws
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod board;
pub mod item;
pub mod order;
pub mod projection;
