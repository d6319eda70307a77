//! Session domain module.
//!
//! This module contains the session-related domain models and the
//! in-memory state container.
//!
//! # Module Structure
//!
//! - `message`: Transcript message types (`MessageRole`, `MessageSource`, `Message`)
//! - `model`: The persisted chat model (`Chat`)
//! - `store`: The session state container (`SessionStore`)

mod message;
mod model;
mod store;

// Re-export public API
pub use message::{Message, MessageDraft, MessageRole, MessageSource};
pub use model::{Chat, DERIVED_NAME_MAX_CHARS};
pub use store::{MAX_CHAT_HISTORY, SessionStore};
