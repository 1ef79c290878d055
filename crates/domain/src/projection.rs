//! Projection: the read-only text form of the board that displays draw.
//!
//! The board is always re-projected in full; nothing here is incremental.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::id::OrderId;
use crate::item::Item;
use crate::order::Order;

/// Whether a line belongs to an item or to one of its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Item,
    Component,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    pub kind: LineKind,
    pub text: String,
}

impl RenderedLine {
    fn item(text: String) -> Self {
        Self {
            kind: LineKind::Item,
            text,
        }
    }

    fn component(text: String) -> Self {
        Self {
            kind: LineKind::Component,
            text,
        }
    }
}

/// One ticket block: the location label and its lines in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedOrder {
    pub id: OrderId,
    pub location: String,
    pub received_at: DateTime<Utc>,
    pub lines: Vec<RenderedLine>,
}

impl RenderedOrder {
    /// Line texts only, without the location label.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }
}

impl fmt::Display for RenderedOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location)?;
        for line in &self.lines {
            match line.kind {
                LineKind::Item => write!(f, "\n{}", line.text)?,
                LineKind::Component => write!(f, "\n  {}", line.text)?,
            }
        }
        Ok(())
    }
}

impl From<&Order> for RenderedOrder {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            location: order.location.clone(),
            received_at: order.received_at,
            lines: order.items.iter().flat_map(render_item).collect(),
        }
    }
}

/// The whole board as displays consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub revision: u64,
    pub orders: Vec<RenderedOrder>,
}

/// Project orders into ticket blocks, one per order, preserving order.
#[must_use]
pub fn project(orders: &[Order]) -> Vec<RenderedOrder> {
    orders.iter().map(RenderedOrder::from).collect()
}

fn render_item(item: &Item) -> Vec<RenderedLine> {
    match item {
        Item::Plain { name } => vec![RenderedLine::item(format!("1x {name}"))],
        Item::Composite { name, components } => {
            let mut lines = Vec::with_capacity(components.len() + 1);
            lines.push(RenderedLine::item(name.clone()));
            lines.extend(
                components
                    .iter()
                    .map(|c| RenderedLine::component(format!("- {}x {}", c.count, c.name))),
            );
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Component;

    #[test]
    fn should_render_plain_item_with_unit_count() {
        let order = Order::new("Table 5", vec![Item::plain("Fries")]);
        let rendered = RenderedOrder::from(&order);
        assert_eq!(rendered.location, "Table 5");
        assert_eq!(rendered.texts(), ["1x Fries"]);
    }

    #[test]
    fn should_render_composite_name_then_components() {
        let order = Order::new(
            "Table 9",
            vec![Item::composite(
                "burger",
                vec![Component::new("cheese", 2), Component::new("bacon", 1)],
            )],
        );
        let rendered = RenderedOrder::from(&order);
        assert_eq!(rendered.texts(), ["burger", "- 2x cheese", "- 1x bacon"]);
        assert_eq!(rendered.lines[0].kind, LineKind::Item);
        assert_eq!(rendered.lines[1].kind, LineKind::Component);
    }

    #[test]
    fn should_render_only_name_for_composite_without_components() {
        let order = Order::new("Bar", vec![Item::composite("Combo", vec![])]);
        assert_eq!(RenderedOrder::from(&order).texts(), ["Combo"]);
    }

    #[test]
    fn should_keep_board_order_when_projecting() {
        let orders = vec![
            Order::new("Table 1", vec![]),
            Order::new("Table 2", vec![]),
            Order::new("Table 3", vec![]),
        ];
        let locations: Vec<String> = project(&orders).into_iter().map(|r| r.location).collect();
        assert_eq!(locations, ["Table 1", "Table 2", "Table 3"]);
    }

    #[test]
    fn should_indent_component_lines_when_displayed() {
        let order = Order::new(
            "Table 2",
            vec![
                Item::plain("Fries"),
                Item::composite("Combo", vec![Component::new("Soda", 1)]),
            ],
        );
        assert_eq!(
            RenderedOrder::from(&order).to_string(),
            "Table 2\n1x Fries\nCombo\n  - 1x Soda"
        );
    }
}
