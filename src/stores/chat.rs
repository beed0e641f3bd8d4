//! Chat store - team messages in send order.

use super::new_id;
use crate::{
    errors::{Error, Result},
    models::{ChatMessage, SalesPerson},
    storage::PersistedStore,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label shown for messages whose sender is not a known sales person.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Team chat history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStore {
    /// Oldest first
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl PersistedStore for ChatStore {
    const STORAGE_KEY: &'static str = "chat-storage";
}

impl ChatStore {
    /// Appends a message. Surrounding whitespace is trimmed and blank messages
    /// are rejected.
    ///
    /// # Errors
    /// Returns `Error::MissingField` for a blank message.
    pub fn add_message(
        &mut self,
        sender_id: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::MissingField { field: "text" });
        }

        self.messages.push(ChatMessage {
            id: new_id(),
            sender_id: sender_id.to_string(),
            text: text.to_string(),
            timestamp: now,
        });
        Ok(&self.messages[self.messages.len() - 1])
    }
}

/// Display name of a message sender, or [`UNKNOWN_SENDER`].
#[must_use]
pub fn sender_name<'a>(people: &'a [SalesPerson], sender_id: &str) -> &'a str {
    people
        .iter()
        .find(|person| person.id == sender_id)
        .map_or(UNKNOWN_SENDER, |person| person.name.as_str())
}
