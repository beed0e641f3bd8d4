//! Team records - users, chat messages and notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Access level, derived from the email at login.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    /// Email contains "admin"
    Admin,
    /// Everyone else
    Sales,
}

/// Logged-in user. The id is the email address, which is also the
/// `sales_person_id` stamped on that user's sales.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Same as the email
    pub id: String,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Access level
    pub role: UserRole,
}

/// Partial profile update; `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// New display name
    pub name: Option<String>,
    /// New email
    pub email: Option<String>,
    /// New role
    pub role: Option<UserRole>,
}

/// One message in the team chat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique identifier
    pub id: String,
    /// User id of the sender
    pub sender_id: String,
    /// Message body, never blank
    pub text: String,
    /// When the message was sent
    pub timestamp: DateTime<Utc>,
}

/// What triggered a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NotificationKind {
    /// A car was sold
    Sale,
    /// A test drive was booked
    TestDrive,
    /// A goal was reached
    Goal,
    /// A chat message arrived
    Chat,
}

/// Broadcast shown to the whole team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier
    pub id: String,
    /// Serialized as `type`
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Short headline
    pub title: String,
    /// Body text
    pub message: String,
    /// When it was raised
    pub timestamp: DateTime<Utc>,
    /// Whether it has been seen
    #[serde(default)]
    pub read: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_notification_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::TestDrive).unwrap(),
            "\"test-drive\""
        );
        assert_eq!(NotificationKind::TestDrive.to_string(), "test-drive");
    }

    #[test]
    fn test_notification_read_defaults_false() {
        let json = r#"{
            "id": "n1",
            "type": "sale",
            "title": "Ny försäljning!",
            "message": "Anna har sålt en ny bil (DACIA)!",
            "timestamp": "2024-06-01T10:00:00Z"
        }"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert!(!notification.read);
        assert_eq!(notification.kind, NotificationKind::Sale);
    }
}
