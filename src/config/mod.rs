//! Configuration for the default dialer cache.
//!
//! The cache reads nothing from the environment. An embedding service builds
//! a [`CacheConfig`] in code or deserializes it from its own config file.

use serde::Deserialize;

use crate::types::UserId;

/// Configuration for a [`DefaultDialerCache`](crate::DefaultDialerCache).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// User answered by `get_current()`.
    pub current_user: UserId,

    /// Number of user entries the map preallocates.
    /// Devices rarely carry more than a handful of profiles.
    pub initial_capacity: usize,

    /// Bound of the event channel feeding the listener task.
    pub event_queue_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            current_user: UserId(0),
            initial_capacity: 4,
            event_queue_size: 64,
        }
    }
}

impl CacheConfig {
    /// Create a config whose current user is `user`.
    pub fn for_user(user: UserId) -> Self {
        Self {
            current_user: user,
            ..Default::default()
        }
    }

    /// Set the current user (builder pattern).
    #[must_use]
    pub fn current_user(mut self, user: UserId) -> Self {
        self.current_user = user;
        self
    }

    /// Set how many entries the map preallocates.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the event channel bound. Zero is bumped to one, tokio rejects empty channels.
    #[must_use]
    pub fn event_queue_size(mut self, size: usize) -> Self {
        self.event_queue_size = size.max(1);
        self
    }
}
