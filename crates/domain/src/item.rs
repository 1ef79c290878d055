//! Item: one line of an order, either a plain dish or a composite bundle.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MalformedItem;

const COMPOSITE: &str = "composite";

/// A named, counted part of a composite item. Components never nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub count: u32,
}

impl Component {
    #[must_use]
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }

    fn from_descriptor(index: usize, descriptor: &Value) -> Result<Self, MalformedItem> {
        let fields = descriptor
            .as_object()
            .ok_or(MalformedItem::ComponentNotAnObject { index })?;
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .ok_or(MalformedItem::ComponentMissingName { index })?;
        let count = match fields.get("count") {
            None | Some(Value::Null) => return Err(MalformedItem::ComponentMissingCount { index }),
            Some(value) => parse_count(value).ok_or(MalformedItem::InvalidCount { index })?,
        };
        Ok(Self::new(name, count))
    }
}

/// A single line within an order.
///
/// Serialized with the same `type` tag an intake payload uses, so a stored
/// order reads back in the shape it was submitted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    /// A single unit of a dish.
    #[serde(rename = "normal")]
    Plain { name: String },
    /// A named bundle rendered as its name followed by its components.
    Composite {
        name: String,
        #[serde(default)]
        components: Vec<Component>,
    },
}

impl Item {
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        Self::Plain { name: name.into() }
    }

    #[must_use]
    pub fn composite(name: impl Into<String>, components: Vec<Component>) -> Self {
        Self::Composite {
            name: name.into(),
            components,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Plain { name } | Self::Composite { name, .. } => name,
        }
    }

    /// Build an item from one element of a payload's `items` array.
    ///
    /// `type == "composite"` always produces [`Item::Composite`]; an absent
    /// `components` field leaves it empty. Any other `type` produces
    /// [`Item::Plain`].
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedItem`] when the descriptor lacks a string `name`,
    /// supplies an empty or non-array `components`, or contains a component
    /// without a string `name` or a non-negative integer `count`.
    pub fn from_descriptor(descriptor: &Value) -> Result<Self, MalformedItem> {
        let fields = descriptor.as_object().ok_or(MalformedItem::NotAnObject)?;
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .ok_or(MalformedItem::MissingName)?;

        if fields.get("type").and_then(Value::as_str) != Some(COMPOSITE) {
            return Ok(Self::plain(name));
        }

        Ok(Self::composite(name, components_of(fields)?))
    }
}

fn components_of(fields: &Map<String, Value>) -> Result<Vec<Component>, MalformedItem> {
    match fields.get("components") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) if entries.is_empty() => Err(MalformedItem::EmptyComponents),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Component::from_descriptor(index, entry))
            .collect(),
        Some(_) => Err(MalformedItem::ComponentsNotArray),
    }
}

/// Accepts a JSON integer or a string holding one, as long as it fits `u32`.
fn parse_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
