//! Per-user default dialer cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::events::{PackageEvent, SystemEvent};
use crate::resolver::DefaultDialerResolver;
use crate::types::{PackageName, UserId};

/// `None` caches "no default set"; a missing key means "not resolved yet".
type Entries = HashMap<UserId, Option<PackageName>>;

/// Cache of each user's default dialer.
///
/// Reads fill lazily from the resolver. Event handlers only ever drop
/// entries; the next read for a dropped user resolves again.
///
/// Cloning is cheap and every clone shares the same map, so one instance can
/// be handed to readers and event sources alike.
#[derive(Clone)]
pub struct DefaultDialerCache {
    inner: Arc<Inner>,
}

struct Inner {
    resolver: Box<dyn DefaultDialerResolver>,
    config: CacheConfig,
    /// Reads, fills and invalidations all serialize on this lock. A resolve
    /// runs while it is held so a fill can never land after an invalidation
    /// that was meant to clear it.
    entries: Mutex<Entries>,
}

impl DefaultDialerCache {
    /// Create an empty cache over `resolver`.
    pub fn new(resolver: impl DefaultDialerResolver + 'static, config: CacheConfig) -> Self {
        let entries = HashMap::with_capacity(config.initial_capacity);
        debug!("Default dialer cache created for current user {}", config.current_user);

        Self {
            inner: Arc::new(Inner {
                resolver: Box::new(resolver),
                config,
                entries: Mutex::new(entries),
            }),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    /// Get the default dialer for `user`.
    ///
    /// Returns the cached answer when present. Otherwise asks the resolver and
    /// caches whatever it returns, including `None`. Resolver failures are
    /// passed through and leave the user uncached.
    pub fn get(&self, user: UserId) -> Result<Option<PackageName>, CacheError> {
        let mut entries = self.inner.entries.lock();

        if let Some(cached) = entries.get(&user) {
            debug!("Default dialer cache hit for user {}", user);
            return Ok(cached.clone());
        }

        debug!("Default dialer cache miss for user {}", user);

        let resolved = self.inner.resolver.resolve(user).map_err(|source| {
            warn!("Failed to resolve default dialer for user {}: {:#}", user, source);
            CacheError::Resolve { user, source }
        })?;

        entries.insert(user, resolved.clone());
        Ok(resolved)
    }

    /// Get the default dialer for the configured current user.
    pub fn get_current(&self) -> Result<Option<PackageName>, CacheError> {
        self.get(self.inner.config.current_user)
    }

    /// Whether `package` is the user's default dialer or the system dialer.
    pub fn is_default_or_system_dialer(
        &self,
        package: &str,
        user: UserId,
    ) -> Result<bool, CacheError> {
        if self.get(user)?.is_some_and(|default| default == package) {
            return Ok(true);
        }
        Ok(self
            .inner
            .resolver
            .system_dialer()
            .is_some_and(|system| system == package))
    }

    /// Handle a package lifecycle notification.
    ///
    /// Returns `true` if the cache was cleared.
    pub fn on_package_event(&self, event: &PackageEvent) -> bool {
        if !event.requires_invalidation() {
            debug!(
                "Ignoring {:?} for package {} (replacing: {})",
                event.kind, event.package, event.replacing
            );
            return false;
        }

        let dropped = self.clear();
        info!(
            "Package {} {:?}, dropped {} default dialer entries",
            event.package, event.kind, dropped
        );
        true
    }

    /// Handle a change of the default dialer setting for any user.
    ///
    /// The notification does not say which user changed, so every entry goes.
    pub fn on_default_setting_changed(&self) -> bool {
        let dropped = self.clear();
        info!(
            "Default dialer setting changed, dropped {} entries",
            dropped
        );
        true
    }

    /// Handle deletion of a user profile. Only that user's entry is dropped.
    pub fn on_user_removed(&self, user: UserId) -> bool {
        let removed = self.inner.entries.lock().remove(&user).is_some();
        if removed {
            info!("User {} removed, dropped cached default dialer", user);
        }
        removed
    }

    /// Route any [`SystemEvent`] to its handler.
    pub fn apply(&self, event: &SystemEvent) -> bool {
        match event {
            SystemEvent::Package(event) => self.on_package_event(event),
            SystemEvent::DefaultSettingChanged => self.on_default_setting_changed(),
            SystemEvent::UserRemoved { user } => self.on_user_removed(*user),
        }
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        let dropped = self.clear();
        debug!("Invalidated all {} default dialer entries", dropped);
    }

    fn clear(&self) -> usize {
        let mut entries = self.inner.entries.lock();
        let dropped = entries.len();
        entries.clear();
        dropped
    }

    /// Number of users with a cached answer.
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().is_empty()
    }

    /// Cached entries ordered by user, for diagnostic dumps.
    pub fn snapshot(&self) -> Vec<(UserId, Option<PackageName>)> {
        let mut entries: Vec<_> = self
            .inner
            .entries
            .lock()
            .iter()
            .map(|(user, package)| (*user, package.clone()))
            .collect();
        entries.sort_by_key(|(user, _)| *user);
        entries
    }
}

impl std::fmt::Debug for DefaultDialerCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultDialerCache")
            .field("current_user", &self.inner.config.current_user)
            .field("entry_count", &self.len())
            .finish()
    }
}
