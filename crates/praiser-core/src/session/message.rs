//! Conversation message types.
//!
//! This module contains types for representing messages in a chat transcript,
//! including roles and input sources.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

/// How a message entered the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    /// Typed text input.
    Text,
    /// Voice transcription.
    Voice,
    /// Generated by the system itself.
    System,
}

/// A single message in a chat transcript.
///
/// Messages are immutable once created; identity is `id`. Each message
/// carries the role of its sender, the input source, and a creation
/// timestamp (ISO 8601 format).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier (UUID format).
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// How the message was produced.
    pub source: MessageSource,
    /// Timestamp when the message was created (ISO 8601 format).
    pub created_at: String,
}

/// Message content as provided by the caller, before an id and timestamp
/// are assigned by the store.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub role: MessageRole,
    pub content: String,
    pub source: MessageSource,
}

impl MessageDraft {
    /// Creates a draft for a typed user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            source: MessageSource::Text,
        }
    }

    /// Creates a draft for an assistant reply.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            source: MessageSource::System,
        }
    }
}

impl Message {
    /// Materializes a draft into a full message, assigning a fresh id and
    /// creation timestamp.
    pub fn from_draft(draft: MessageDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: draft.role,
            content: draft.content,
            source: draft.source,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
