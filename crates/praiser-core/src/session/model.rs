//! Chat domain model.
//!
//! A `Chat` is a named, persisted transcript, distinct from the live
//! session transcript that has not been saved yet.

use super::message::Message;
use serde::{Deserialize, Serialize};

/// Maximum number of characters of the first message used to derive a
/// chat name when none was set explicitly.
pub const DERIVED_NAME_MAX_CHARS: usize = 50;

/// A named, persisted chat transcript.
///
/// Created on first save of a non-empty active session; `id` persists
/// across edits and `updated_at` is refreshed on every save. A chat with
/// zero messages is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Unique chat identifier (UUID format).
    pub id: String,
    /// Human-readable chat name.
    pub name: String,
    /// The persisted transcript, in send order.
    pub messages: Vec<Message>,
    /// Timestamp when the chat was first saved (ISO 8601 format).
    pub created_at: String,
    /// Timestamp of the most recent save (ISO 8601 format).
    pub updated_at: String,
}

impl Chat {
    /// Derives a display name from the first message of a transcript.
    ///
    /// Takes the first [`DERIVED_NAME_MAX_CHARS`] characters of the first
    /// message's content, or "New Chat" when the transcript is empty.
    pub fn derive_name(messages: &[Message]) -> String {
        messages
            .first()
            .map(|m| m.content.chars().take(DERIVED_NAME_MAX_CHARS).collect())
            .filter(|name: &String| !name.is_empty())
            .unwrap_or_else(|| "New Chat".to_string())
    }
}
