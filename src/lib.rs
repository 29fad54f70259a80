//! Default Dialer Cache
//!
//! Remembers which application each user has designated as their default
//! dialer, so repeated lookups skip the expensive authoritative query.
//!
//! ## Architecture
//!
//! - `types` - User and package identifiers
//! - `config` - Cache configuration
//! - `resolver` - The authoritative lookup the cache falls back to
//! - `cache` - Per-user entries with lazy fill and bulk invalidation
//! - `events` - Package, setting and user events, plus channel delivery
//! - `error` - Error type

pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod resolver;
pub mod types;

pub use cache::DefaultDialerCache;
pub use config::CacheConfig;
pub use error::CacheError;
pub use events::{EventSender, PackageEvent, PackageEventKind, SystemEvent, spawn_listener};
pub use resolver::{DefaultDialerResolver, FnResolver};
pub use types::{PackageName, UserId};
