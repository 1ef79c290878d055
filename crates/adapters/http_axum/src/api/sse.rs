//! Server-Sent Events (SSE) stream of board updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use kds_app::ports::{BoardPublisher, OrderStore};
use kds_domain::board::BoardSnapshot;

use crate::state::AppState;

/// `GET /api/orders/stream`: SSE stream of the projected board.
///
/// The first frame carries the board as it stands when the client connects;
/// every later frame is a complete re-projection after a board change. Each
/// frame is a `board` event whose data is the JSON board view. A snapshot
/// that is not newer than the last one sent is dropped.
pub async fn stream<S, P>(
    State(state): State<AppState<S, P>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    // Subscribe before reading the current board so no update falls between.
    let updates = BroadcastStream::new(state.board_bus.subscribe());
    let current = match state.order_service.snapshot().await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            tracing::warn!(%err, "failed to read board for new SSE subscriber");
            None
        }
    };

    let mut sent: Option<u64> = None;
    let frames = tokio_stream::iter(current.into_iter().map(Ok))
        .chain(updates)
        .filter_map(move |result| match result {
            Ok(snapshot) if snapshot.supersedes(sent) => {
                sent = Some(snapshot.revision);
                board_event(&snapshot).map(Ok)
            }
            Ok(snapshot) => {
                tracing::trace!(revision = snapshot.revision, sent = ?sent, "dropping stale board");
                None
            }
            Err(BroadcastStreamRecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "SSE subscriber lagged, some boards were dropped");
                None
            }
        });

    Sse::new(frames).keep_alive(KeepAlive::default())
}

fn board_event(snapshot: &BoardSnapshot) -> Option<Event> {
    match serde_json::to_string(&snapshot.view()) {
        Ok(json) => Some(
            Event::default()
                .event("board")
                .id(snapshot.revision.to_string())
                .data(json),
        ),
        Err(err) => {
            tracing::warn!(%err, "failed to serialize board for SSE stream");
            None
        }
    }
}
