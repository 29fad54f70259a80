//! Cache module - per-user default dialer lookups.
//!
//! ## Architecture
//!
//! - `DefaultDialerCache` - map of user to resolved dialer behind one lock
//! - Misses go to the injected `DefaultDialerResolver`
//! - Package, setting and user events drop entries; nothing is refreshed eagerly
//!
//! ## Usage
//!
//! ```rust
//! use default_dialer_cache::{CacheConfig, DefaultDialerCache, FnResolver, PackageEvent, UserId};
//!
//! let resolver = FnResolver::new(|_user| Ok(Some("com.android.dialer".into())));
//! let cache = DefaultDialerCache::new(resolver, CacheConfig::default());
//!
//! assert!(cache.get(UserId(0))?.is_some());
//! cache.on_package_event(&PackageEvent::added("com.example.phone"));
//! # Ok::<(), default_dialer_cache::CacheError>(())
//! ```

mod store;

pub use store::DefaultDialerCache;
