//! Channel delivery of events into the cache.
//!
//! Event sources hold an [`EventSender`]; a background task applies each
//! event to the cache in arrival order.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::SystemEvent;
use crate::cache::DefaultDialerCache;
use crate::error::CacheError;

/// Sending half of the event channel. Clone one per event source.
#[derive(Clone, Debug)]
pub struct EventSender {
    tx: mpsc::Sender<SystemEvent>,
}

impl EventSender {
    /// Queue an event for the listener, waiting if the queue is full.
    pub async fn send(&self, event: impl Into<SystemEvent>) -> Result<(), CacheError> {
        self.tx
            .send(event.into())
            .await
            .map_err(|_| CacheError::ListenerClosed)
    }

    /// Queue an event without waiting.
    ///
    /// Fails with [`CacheError::QueueFull`] while the queue is at capacity and
    /// with [`CacheError::ListenerClosed`] once the listener has stopped.
    pub fn try_send(&self, event: impl Into<SystemEvent>) -> Result<(), CacheError> {
        self.tx.try_send(event.into()).map_err(|err| match err {
            TrySendError::Full(_) => CacheError::QueueFull,
            TrySendError::Closed(_) => CacheError::ListenerClosed,
        })
    }
}

/// Spawn the listener task on the current tokio runtime.
///
/// The task runs until every [`EventSender`] is dropped. The returned handle
/// resolves to the number of events that invalidated something.
pub fn spawn_listener(cache: DefaultDialerCache) -> (EventSender, JoinHandle<u64>) {
    let (tx, mut rx) = mpsc::channel(cache.config().event_queue_size.max(1));

    let handle = tokio::spawn(async move {
        info!("Default dialer event listener started");
        let mut invalidations = 0u64;

        while let Some(event) = rx.recv().await {
            debug!("Applying {:?}", event);
            // Handlers only touch the map, never await.
            if cache.apply(&event) {
                invalidations += 1;
            }
        }

        info!(
            "Default dialer event listener stopped after {} invalidations",
            invalidations
        );
        invalidations
    });

    (EventSender { tx }, handle)
}
