//! # kds-adapter-console
//!
//! Terminal display surface for the kitchen board.
//!
//! ## Responsibilities
//! - Subscribe to board snapshots published by the application layer
//! - Re-project and redraw the **whole** board for every newer snapshot
//! - Skip snapshots that arrive out of order (older revision than the one drawn)
//!
//! The console is read-only: dismissing orders happens through the HTTP
//! surfaces, which feed the same board.
//!
//! ## Dependency rule
//! Depends on `kds-domain` only; snapshots arrive over a plain tokio
//! broadcast receiver handed in by the composition root.

use std::io::{self, Write};

use tokio::sync::broadcast::{self, error::RecvError};

use kds_domain::board::BoardSnapshot;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Render the full board as plain text.
#[must_use]
pub fn render_board(snapshot: &BoardSnapshot) -> String {
    let mut out = format!(
        "=== Kitchen board · revision {} · {} open ===\n",
        snapshot.revision,
        snapshot.len()
    );
    if snapshot.is_empty() {
        out.push_str("(no open orders)\n");
        return out;
    }
    for rendered in snapshot.project() {
        out.push_str(&format!(
            "\n[{}] {rendered}\n",
            rendered.received_at.format("%H:%M:%S")
        ));
    }
    out
}

/// Draws board snapshots onto a writer, newest revision wins.
pub struct ConsoleDisplay<W> {
    writer: W,
    clear_screen: bool,
    drawn: Option<u64>,
}

impl<W: Write> ConsoleDisplay<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            clear_screen: false,
            drawn: None,
        }
    }

    /// Clear the terminal before each redraw.
    #[must_use]
    pub fn clearing(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Revision of the board currently on screen.
    #[must_use]
    pub fn drawn_revision(&self) -> Option<u64> {
        self.drawn
    }

    /// Redraw from `snapshot` unless it is not newer than what is shown.
    ///
    /// Returns whether anything was drawn.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the writer fails.
    pub fn draw(&mut self, snapshot: &BoardSnapshot) -> io::Result<bool> {
        if !snapshot.supersedes(self.drawn) {
            tracing::trace!(
                revision = snapshot.revision,
                drawn = ?self.drawn,
                "skipping stale board"
            );
            return Ok(false);
        }
        if self.clear_screen {
            self.writer.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.writer.write_all(render_board(snapshot).as_bytes())?;
        self.writer.flush()?;
        self.drawn = Some(snapshot.revision);
        Ok(true)
    }

    /// Draw `initial`, then every update until the bus closes, and hand the
    /// display back.
    pub async fn run(
        mut self,
        initial: BoardSnapshot,
        mut updates: broadcast::Receiver<BoardSnapshot>,
    ) -> Self {
        self.redraw(&initial);
        loop {
            match updates.recv().await {
                Ok(snapshot) => self.redraw(&snapshot),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "console display lagged behind board updates");
                }
                Err(RecvError::Closed) => break,
            }
        }
        tracing::debug!("console display stopped");
        self
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn redraw(&mut self, snapshot: &BoardSnapshot) {
        if let Err(err) = self.draw(snapshot) {
            tracing::warn!(error = %err, revision = snapshot.revision, "failed to draw board");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kds_app::board_bus::InProcessBoardBus;
    use kds_app::ports::BoardPublisher;
    use kds_domain::item::{Component, Item};
    use kds_domain::order::Order;

    fn board(revision: u64, orders: Vec<Order>) -> BoardSnapshot {
        BoardSnapshot { revision, orders }
    }

    fn text(display: ConsoleDisplay<Vec<u8>>) -> String {
        String::from_utf8(display.into_inner()).unwrap()
    }

    #[test]
    fn should_render_empty_board() {
        let out = render_board(&board(0, vec![]));
        assert!(out.contains("revision 0"));
        assert!(out.contains("(no open orders)"));
    }

    #[test]
    fn should_render_every_order_with_its_lines() {
        let out = render_board(&board(
            2,
            vec![
                Order::new("Table 5", vec![Item::plain("Fries")]),
                Order::new(
                    "Table 2",
                    vec![Item::composite(
                        "Combo",
                        vec![Component::new("Burger", 1), Component::new("Soda", 1)],
                    )],
                ),
            ],
        ));

        assert!(out.contains("2 open"));
        assert!(out.contains("Table 5\n1x Fries"));
        assert!(out.contains("Table 2\nCombo\n  - 1x Burger\n  - 1x Soda"));
        assert!(out.find("Table 5").unwrap() < out.find("Table 2").unwrap());
    }

    #[test]
    fn should_end_each_ticket_with_newline() {
        let out = render_board(&board(
            2,
            vec![
                Order::new("Table 5", vec![Item::plain("Fries")]),
                Order::new("Table 6", vec![Item::plain("Soup")]),
            ],
        ));

        assert!(out.contains("1x Fries\n\n["));
        assert!(out.ends_with("1x Soup\n"));
    }

    #[test]
    fn should_skip_snapshot_not_newer_than_drawn() {
        let mut display = ConsoleDisplay::new(Vec::new());

        assert!(display.draw(&board(2, vec![])).unwrap());
        assert!(!display.draw(&board(1, vec![Order::new("Late", vec![])])).unwrap());
        assert!(!display.draw(&board(2, vec![])).unwrap());

        assert_eq!(display.drawn_revision(), Some(2));
        assert!(!text(display).contains("Late"));
    }

    #[test]
    fn should_clear_screen_before_redraw_when_enabled() {
        let mut display = ConsoleDisplay::new(Vec::new()).clearing(true);
        display.draw(&board(1, vec![])).unwrap();
        assert!(text(display).starts_with(CLEAR_SCREEN));
    }

    #[tokio::test]
    async fn should_redraw_on_each_published_board_until_bus_closes() {
        let bus = InProcessBoardBus::new(8);
        let updates = bus.subscribe();
        let task = tokio::spawn(ConsoleDisplay::new(Vec::new()).run(board(0, vec![]), updates));

        bus.publish(board(1, vec![Order::new("Table 1", vec![])]))
            .await
            .unwrap();
        bus.publish(board(2, vec![])).await.unwrap();
        drop(bus);

        let display = task.await.unwrap();
        assert_eq!(display.drawn_revision(), Some(2));
        let out = text(display);
        assert!(out.contains("Table 1"));
        assert_eq!(out.matches("=== Kitchen board").count(), 3);
    }
}
