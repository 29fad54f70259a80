//! Events that can make a cached default dialer stale.
//!
//! The surrounding system owns the subscriptions (package broadcasts and the
//! settings observer) and pushes typed records into the cache, either by
//! calling its handlers directly or through the [`listener`] channel.
//!
//! ## Invalidation policy
//!
//! | Event                          | Effect           |
//! |--------------------------------|------------------|
//! | package changed                | drop every entry |
//! | package added                  | drop every entry |
//! | package removed, not replacing | drop every entry |
//! | package removed, replacing     | nothing          |
//! | other package action           | nothing          |
//! | default setting changed        | drop every entry |
//! | user removed                   | drop that user   |

pub mod listener;

use serde::{Deserialize, Serialize};

use crate::types::{PackageName, UserId};

pub use listener::{EventSender, spawn_listener};

pub const ACTION_PACKAGE_CHANGED: &str = "android.intent.action.PACKAGE_CHANGED";
pub const ACTION_PACKAGE_ADDED: &str = "android.intent.action.PACKAGE_ADDED";
pub const ACTION_PACKAGE_REMOVED: &str = "android.intent.action.PACKAGE_REMOVED";

/// Classification of a package lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageEventKind {
    /// Enabled, disabled, or a component changed state.
    Changed,
    Added,
    Removed,
    Other,
}

impl PackageEventKind {
    /// Classify a platform broadcast action. Unknown actions are `Other`.
    pub fn from_action(action: &str) -> Self {
        match action {
            ACTION_PACKAGE_CHANGED => Self::Changed,
            ACTION_PACKAGE_ADDED => Self::Added,
            ACTION_PACKAGE_REMOVED => Self::Removed,
            _ => Self::Other,
        }
    }
}

/// A package lifecycle notification, scoped to the whole system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEvent {
    pub package: PackageName,
    pub kind: PackageEventKind,
    /// Set on a removal that is half of an update in place.
    /// An `Added` event for the same package follows.
    #[serde(default)]
    pub replacing: bool,
}

impl PackageEvent {
    pub fn new(package: impl Into<PackageName>, kind: PackageEventKind, replacing: bool) -> Self {
        Self {
            package: package.into(),
            kind,
            replacing,
        }
    }

    pub fn changed(package: impl Into<PackageName>) -> Self {
        Self::new(package, PackageEventKind::Changed, false)
    }

    pub fn added(package: impl Into<PackageName>) -> Self {
        Self::new(package, PackageEventKind::Added, false)
    }

    pub fn removed(package: impl Into<PackageName>, replacing: bool) -> Self {
        Self::new(package, PackageEventKind::Removed, replacing)
    }

    pub fn other(package: impl Into<PackageName>) -> Self {
        Self::new(package, PackageEventKind::Other, false)
    }

    /// Build an event from a broadcast action and its `package:` data URI.
    ///
    /// Returns `None` when the URI does not name a package.
    pub fn from_broadcast(action: &str, data_uri: &str, replacing: bool) -> Option<Self> {
        let package = data_uri.strip_prefix("package:")?;
        if package.is_empty() {
            return None;
        }
        Some(Self::new(package, PackageEventKind::from_action(action), replacing))
    }

    /// Whether this event forces every cached entry to be dropped.
    ///
    /// Which packages qualify as a dialer is only known to the resolver, so
    /// any relevant event drops everything regardless of the package named.
    pub fn requires_invalidation(&self) -> bool {
        match self.kind {
            PackageEventKind::Changed | PackageEventKind::Added => true,
            PackageEventKind::Removed => !self.replacing,
            PackageEventKind::Other => false,
        }
    }
}

/// Every event the cache reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SystemEvent {
    Package(PackageEvent),
    /// The default dialer setting changed for some user.
    DefaultSettingChanged,
    /// A user profile was deleted from the device.
    UserRemoved { user: UserId },
}

impl From<PackageEvent> for SystemEvent {
    fn from(event: PackageEvent) -> Self {
        Self::Package(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_actions() {
        assert_eq!(
            PackageEventKind::from_action(ACTION_PACKAGE_CHANGED),
            PackageEventKind::Changed
        );
        assert_eq!(
            PackageEventKind::from_action(ACTION_PACKAGE_ADDED),
            PackageEventKind::Added
        );
        assert_eq!(
            PackageEventKind::from_action(ACTION_PACKAGE_REMOVED),
            PackageEventKind::Removed
        );
        assert_eq!(
            PackageEventKind::from_action("android.intent.action.PACKAGE_RESTARTED"),
            PackageEventKind::Other
        );
    }

    #[test]
    fn test_requires_invalidation() {
        assert!(PackageEvent::changed("red.orange.blue").requires_invalidation());
        assert!(PackageEvent::added("ppp.qqq.zzz").requires_invalidation());
        assert!(PackageEvent::removed("com.android.dialer", false).requires_invalidation());
        assert!(!PackageEvent::removed("com.android.dialer", true).requires_invalidation());
        assert!(!PackageEvent::other("com.android.dialer").requires_invalidation());
    }

    #[test]
    fn test_replacing_only_matters_for_removal() {
        let added = PackageEvent::new("com.android.dialer", PackageEventKind::Added, true);
        assert!(added.requires_invalidation());
    }

    #[test]
    fn test_from_broadcast() {
        let event =
            PackageEvent::from_broadcast(ACTION_PACKAGE_REMOVED, "package:com.android.dialer", true)
                .unwrap();
        assert_eq!(event.package, "com.android.dialer");
        assert_eq!(event.kind, PackageEventKind::Removed);
        assert!(event.replacing);

        assert!(PackageEvent::from_broadcast(ACTION_PACKAGE_ADDED, "package:", false).is_none());
        assert!(PackageEvent::from_broadcast(ACTION_PACKAGE_ADDED, "file:///x", false).is_none());
    }

    #[test]
    fn test_event_records_deserialize() {
        let event: SystemEvent = serde_json::from_str(
            r#"{ "type": "package", "package": "xyz.abc.dialer", "kind": "removed" }"#,
        )
        .unwrap();
        assert_eq!(event, SystemEvent::Package(PackageEvent::removed("xyz.abc.dialer", false)));

        let event: SystemEvent =
            serde_json::from_str(r#"{ "type": "default_setting_changed" }"#).unwrap();
        assert_eq!(event, SystemEvent::DefaultSettingChanged);

        let event: SystemEvent =
            serde_json::from_str(r#"{ "type": "user_removed", "user": 10 }"#).unwrap();
        assert_eq!(event, SystemEvent::UserRemoved { user: UserId(10) });
    }
}
