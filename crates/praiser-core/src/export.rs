//! Plain-text transcript export.
//!
//! Serializes a saved chat into a downloadable text transcript. Consumes
//! `Chat.messages` read-only; the surrounding UI decides where the file
//! goes.

use crate::session::{Chat, MessageRole};

/// Renders a chat as a plain-text transcript.
///
/// The output starts with the chat name underlined, followed by one
/// block per message with its attribution and creation timestamp.
pub fn transcript_text(chat: &Chat) -> String {
    let title = if chat.name.is_empty() {
        "Chat Export"
    } else {
        chat.name.as_str()
    };

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push_str("\n\n");

    for message in &chat.messages {
        let who = match message.role {
            MessageRole::User => "You",
            MessageRole::Assistant => "Assistant",
            MessageRole::System => "System",
        };
        out.push_str(&format!("[{}] - {}\n", who, message.created_at));
        out.push_str(&message.content);
        out.push_str("\n\n");
    }

    out
}

/// Builds a filesystem-safe file name for an exported transcript.
///
/// Non-alphanumeric characters in the chat name are replaced with
/// underscores; the last-updated timestamp keeps repeated exports
/// distinct.
pub fn export_file_name(chat: &Chat) -> String {
    let base = if chat.name.is_empty() {
        "chat_export".to_string()
    } else {
        chat.name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    };
    let stamp: String = chat
        .updated_at
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}.txt", base, stamp)
}
