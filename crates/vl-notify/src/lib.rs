//! Persistent notification sink for the vehiclelink integration
//!
//! In-memory create/dismiss-by-key store that the command dispatcher uses
//! for pending, success, and failure notifications. The host platform
//! renders these; nothing here blocks or acknowledges.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A user-visible notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification key; pending notifications reuse a fixed key so
    /// they can be dismissed later
    pub notification_id: String,
    /// Notification message
    pub message: String,
    /// Optional title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Notification {
    fn new(notification_id: String, message: String, title: Option<String>) -> Self {
        Self {
            notification_id,
            message,
            title,
            created_at: Utc::now(),
        }
    }
}

/// In-memory notification store
///
/// All operations are idempotent: re-creating a key replaces the existing
/// notification, dismissing an absent key is a no-op.
#[derive(Debug, Default)]
pub struct NotificationManager {
    notifications: DashMap<String, Notification>,
}

impl NotificationManager {
    /// Create a new notification manager
    pub fn new() -> Self {
        Self {
            notifications: DashMap::new(),
        }
    }

    /// Create or replace a notification under an explicit key
    pub fn create(
        &self,
        notification_id: impl Into<String>,
        message: impl Into<String>,
        title: Option<String>,
    ) -> Notification {
        let notification_id = notification_id.into();
        let notification = Notification::new(notification_id.clone(), message.into(), title);

        debug!(notification_id = %notification_id, "Creating notification");
        self.notifications
            .insert(notification_id, notification.clone());
        notification
    }

    /// Create a notification under a freshly generated key
    ///
    /// Used for result notifications that are never programmatically
    /// dismissed, so successive commands do not overwrite each other.
    pub fn create_auto(&self, message: impl Into<String>, title: Option<String>) -> Notification {
        self.create(ulid::Ulid::new().to_string(), message, title)
    }

    /// Dismiss a notification; returns it if it existed
    pub fn dismiss(&self, notification_id: &str) -> Option<Notification> {
        let removed = self
            .notifications
            .remove(notification_id)
            .map(|(_, notification)| notification);
        if removed.is_some() {
            debug!(notification_id = %notification_id, "Dismissed notification");
        }
        removed
    }

    /// Get a notification by key
    pub fn get(&self, notification_id: &str) -> Option<Notification> {
        self.notifications
            .get(notification_id)
            .map(|r| r.value().clone())
    }

    /// All current notifications
    pub fn all(&self) -> Vec<Notification> {
        self.notifications
            .iter()
            .map(|r| r.value().clone())
            .collect()
    }

    /// Number of current notifications
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// True when no notifications exist
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

/// Thread-safe wrapper for NotificationManager
pub type SharedNotificationManager = Arc<NotificationManager>;
