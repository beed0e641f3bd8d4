//! Notification store - one shared broadcast list, newest first.

use super::new_id;
use crate::{
    errors::{Error, Result},
    models::{Notification, NotificationKind},
    storage::PersistedStore,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Notifications shared by the whole team.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationStore {
    /// Newest first
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl PersistedStore for NotificationStore {
    const STORAGE_KEY: &'static str = "notification-storage";
}

impl NotificationStore {
    /// Prepends an unread notification.
    pub fn add(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &Notification {
        let notification = Notification {
            id: new_id(),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp: now,
            read: false,
        };
        debug!(id = %notification.id, kind = %notification.kind, "Queued notification");
        self.notifications.insert(0, notification);
        &self.notifications[0]
    }

    /// Marks one notification as read.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id.
    pub fn mark_as_read(&mut self, id: &str) -> Result<()> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::NotFound {
                entity: "Notification",
                id: id.to_string(),
            })?;
        notification.read = true;
        Ok(())
    }

    /// Marks every notification as read.
    pub fn mark_all_as_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }

    /// Number of notifications not yet read.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}
