//! The authoritative source of "which app is this user's default dialer".
//!
//! The cache only ever talks to a [`DefaultDialerResolver`]. Production code
//! wraps its platform lookup in a [`FnResolver`]; tests inject a recording
//! double.

use std::sync::Arc;

use crate::types::{PackageName, UserId};

/// Resolves a user to the package currently designated as their default dialer.
///
/// Implementations own whatever context the lookup needs. Calls are expected
/// to be quick local queries; the cache invokes them while holding its lock.
pub trait DefaultDialerResolver: Send + Sync {
    /// Returns the user's default dialer, or `None` when no default is set.
    fn resolve(&self, user: UserId) -> anyhow::Result<Option<PackageName>>;

    /// The dialer preinstalled with the system image, if known.
    fn system_dialer(&self) -> Option<PackageName> {
        None
    }
}

impl<R: DefaultDialerResolver + ?Sized> DefaultDialerResolver for Arc<R> {
    fn resolve(&self, user: UserId) -> anyhow::Result<Option<PackageName>> {
        (**self).resolve(user)
    }

    fn system_dialer(&self) -> Option<PackageName> {
        (**self).system_dialer()
    }
}

impl<R: DefaultDialerResolver + ?Sized> DefaultDialerResolver for Box<R> {
    fn resolve(&self, user: UserId) -> anyhow::Result<Option<PackageName>> {
        (**self).resolve(user)
    }

    fn system_dialer(&self) -> Option<PackageName> {
        (**self).system_dialer()
    }
}

/// Resolver backed by a closure over the platform lookup.
pub struct FnResolver<F> {
    lookup: F,
    system_dialer: Option<PackageName>,
}

impl<F> FnResolver<F>
where
    F: Fn(UserId) -> anyhow::Result<Option<PackageName>> + Send + Sync,
{
    pub fn new(lookup: F) -> Self {
        Self {
            lookup,
            system_dialer: None,
        }
    }

    /// Set the system dialer reported by this resolver.
    #[must_use]
    pub fn with_system_dialer(mut self, package: impl Into<PackageName>) -> Self {
        self.system_dialer = Some(package.into());
        self
    }
}

impl<F> DefaultDialerResolver for FnResolver<F>
where
    F: Fn(UserId) -> anyhow::Result<Option<PackageName>> + Send + Sync,
{
    fn resolve(&self, user: UserId) -> anyhow::Result<Option<PackageName>> {
        (self.lookup)(user)
    }

    fn system_dialer(&self) -> Option<PackageName> {
        self.system_dialer.clone()
    }
}

impl<F> std::fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnResolver")
            .field("system_dialer", &self.system_dialer)
            .finish_non_exhaustive()
    }
}

/// Recording test double with swappable per-user answers.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use anyhow::anyhow;
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct RecordingResolver {
        answers: Mutex<HashMap<UserId, Option<PackageName>>>,
        calls: Mutex<HashMap<UserId, usize>>,
        failing: Mutex<Option<UserId>>,
    }

    impl RecordingResolver {
        pub fn shared() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Set what `resolve(user)` answers from now on.
        pub fn answer(&self, user: UserId, package: Option<&str>) {
            self.answers
                .lock()
                .insert(user, package.map(PackageName::from));
        }

        /// Make `resolve(user)` fail until cleared with `None`.
        pub fn fail_for(&self, user: Option<UserId>) {
            *self.failing.lock() = user;
        }

        pub fn calls(&self, user: UserId) -> usize {
            self.calls.lock().get(&user).copied().unwrap_or(0)
        }
    }

    impl DefaultDialerResolver for RecordingResolver {
        fn resolve(&self, user: UserId) -> anyhow::Result<Option<PackageName>> {
            *self.calls.lock().entry(user).or_insert(0) += 1;

            if *self.failing.lock() == Some(user) {
                return Err(anyhow!("role service unavailable"));
            }

            Ok(self.answers.lock().get(&user).cloned().flatten())
        }

        fn system_dialer(&self) -> Option<PackageName> {
            Some(PackageName::from("com.android.dialer"))
        }
    }
}
