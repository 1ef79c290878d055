//! Error types shared across the workspace.
//!
//! Parsing failures are typed all the way down: a [`MalformedItem`] is always
//! wrapped in the [`MalformedOrder`] of the payload it came from, and every
//! layer converts into [`KdsError`] via `#[from]`.

/// Why a single item descriptor was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedItem {
    #[error("item is not a JSON object")]
    NotAnObject,

    #[error("item has no string `name`")]
    MissingName,

    #[error("`components` is not an array")]
    ComponentsNotArray,

    #[error("composite item supplied an empty `components` array")]
    EmptyComponents,

    #[error("component {index} is not a JSON object")]
    ComponentNotAnObject { index: usize },

    #[error("component {index} has no string `name`")]
    ComponentMissingName { index: usize },

    #[error("component {index} has no `count`")]
    ComponentMissingCount { index: usize },

    #[error("component {index} has a `count` that is not a non-negative integer")]
    InvalidCount { index: usize },
}

/// Why an inbound order payload was rejected.
///
/// A rejected payload never reaches the order store.
#[derive(Debug, thiserror::Error)]
pub enum MalformedOrder {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("missing string field `location`")]
    MissingLocation,

    #[error("missing array field `items`")]
    MissingItems,

    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: MalformedItem,
    },
}

/// A lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Top-level error for the kitchen display system.
#[derive(Debug, thiserror::Error)]
pub enum KdsError {
    #[error(transparent)]
    Malformed(#[from] MalformedOrder),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The worker that owns removals has shut down.
    #[error("removal worker is not running")]
    WorkerUnavailable,
}
