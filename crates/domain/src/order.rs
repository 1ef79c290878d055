//! Order: one kitchen ticket bound for a location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MalformedOrder;
use crate::id::OrderId;
use crate::item::Item;

/// A kitchen ticket. Created whole at intake and never edited afterwards;
/// it only leaves the board by removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub location: String,
    pub items: Vec<Item>,
    pub received_at: DateTime<Utc>,
}

impl Order {
    /// Create an order with a fresh id, stamped with the current time.
    #[must_use]
    pub fn new(location: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            id: OrderId::new(),
            location: location.into(),
            items,
            received_at: Utc::now(),
        }
    }

    /// Parse a raw intake payload.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedOrder::InvalidJson`] when the bytes are not JSON,
    /// otherwise whatever [`Order::from_payload`] reports.
    pub fn from_json(payload: &[u8]) -> Result<Self, MalformedOrder> {
        let value: Value = serde_json::from_slice(payload)?;
        Self::from_payload(&value)
    }

    /// Build an order from an already-decoded payload.
    ///
    /// Every item is parsed before the order exists, so a single bad item
    /// rejects the whole payload.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedOrder`] if the payload is not an object, lacks a
    /// string `location` or an array `items`, or if any item is malformed.
    pub fn from_payload(payload: &Value) -> Result<Self, MalformedOrder> {
        let fields = payload.as_object().ok_or(MalformedOrder::NotAnObject)?;
        let location = fields
            .get("location")
            .and_then(Value::as_str)
            .ok_or(MalformedOrder::MissingLocation)?;
        let descriptors = fields
            .get("items")
            .and_then(Value::as_array)
            .ok_or(MalformedOrder::MissingItems)?;

        let items = descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                Item::from_descriptor(descriptor)
                    .map_err(|source| MalformedOrder::Item { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(location, items))
    }
}
