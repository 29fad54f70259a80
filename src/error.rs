//! Error type for cache operations.

use crate::types::UserId;

/// Errors surfaced by the cache and its event listener.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The resolver failed for `user`. Nothing was cached.
    #[error("failed to resolve default dialer for user {user}")]
    Resolve {
        user: UserId,
        #[source]
        source: anyhow::Error,
    },

    /// The event queue is full. The listener is still running; retry later.
    #[error("event queue is full")]
    QueueFull,

    /// The listener task has stopped and no longer accepts events.
    #[error("event listener is closed")]
    ListenerClosed,
}
