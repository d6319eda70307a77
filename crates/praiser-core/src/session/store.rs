//! The in-memory session state container.
//!
//! `SessionStore` is the single source of truth for UI-observable state:
//! the active chat transcript, the transient UI toggles, and the chat
//! history list. It performs no I/O of its own; the owning service wires
//! each mutation to its persistence side effects.

use super::message::{Message, MessageDraft};
use super::model::Chat;
use crate::settings::{
    DEFAULT_MANUAL_VOLUME, DEFAULT_SITE_NAME, DEFAULT_SITE_SUBTITLE, Language, PersonInfo,
    PraiseMode, Settings, clamp_volume,
};

/// Maximum number of chats kept in the history; older entries beyond the
/// cap are silently dropped on save.
pub const MAX_CHAT_HISTORY: usize = 50;

/// Single source of truth for session state.
///
/// Every mutation is atomic with respect to observers: callers hold the
/// store behind a lock and all derived fields update together. None of
/// the operations can fail; numeric inputs are clamped instead of
/// rejected.
#[derive(Debug, Clone)]
pub struct SessionStore {
    messages: Vec<Message>,
    chat_name: String,
    current_chat_id: Option<String>,
    chats: Vec<Chat>,
    person_info: Option<PersonInfo>,
    praise_volume: u8,
    praise_bar_visible: bool,
    praise_mode: PraiseMode,
    manual_praise_volume: u8,
    processing: bool,
    ui_language: Language,
    site_name: String,
    site_subtitle: String,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            chat_name: String::new(),
            current_chat_id: None,
            chats: Vec::new(),
            person_info: None,
            praise_volume: DEFAULT_MANUAL_VOLUME,
            praise_bar_visible: true,
            praise_mode: PraiseMode::Manual,
            manual_praise_volume: DEFAULT_MANUAL_VOLUME,
            processing: false,
            ui_language: Language::En,
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_subtitle: DEFAULT_SITE_SUBTITLE.to_string(),
        }
    }
}

impl SessionStore {
    /// Creates a store with hard-coded defaults and an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a previously persisted chat history.
    ///
    /// Only the history is seeded at construction; the settings fields
    /// keep their defaults until the load sequence applies the merged
    /// document, so a stale value never flashes before the fetch lands.
    pub fn with_history(chats: Vec<Chat>) -> Self {
        Self {
            chats,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Transcript operations
    // ------------------------------------------------------------------

    /// Appends a message to the active transcript, assigning a generated
    /// id and creation timestamp. Always succeeds.
    pub fn add_message(&mut self, draft: MessageDraft) -> &Message {
        self.messages.push(Message::from_draft(draft));
        // Safe to unwrap because we just pushed an element
        self.messages.last().unwrap()
    }

    /// Appends several messages in call order.
    pub fn append_messages(&mut self, drafts: Vec<MessageDraft>) {
        self.messages
            .extend(drafts.into_iter().map(Message::from_draft));
    }

    /// Saves the active transcript into the chat history.
    ///
    /// No-op on an empty transcript: an empty chat is never persisted.
    /// Reuses the existing id and creation timestamp when the active
    /// session has been saved before, otherwise mints both. The entry is
    /// upserted by id and moved to the front so the history stays ordered
    /// most-recently-updated first, then truncated to
    /// [`MAX_CHAT_HISTORY`] entries.
    ///
    /// Returns true when the history changed and should be persisted.
    pub fn save_current_chat(&mut self) -> bool {
        if self.messages.is_empty() {
            return false;
        }

        let name = if self.chat_name.is_empty() {
            Chat::derive_name(&self.messages)
        } else {
            self.chat_name.clone()
        };
        let now = chrono::Utc::now().to_rfc3339();
        let (id, created_at) = match &self.current_chat_id {
            Some(id) => {
                let created = self
                    .chats
                    .iter()
                    .find(|c| &c.id == id)
                    .map(|c| c.created_at.clone())
                    .unwrap_or_else(|| now.clone());
                (id.clone(), created)
            }
            None => (uuid::Uuid::new_v4().to_string(), now.clone()),
        };

        let chat = Chat {
            id: id.clone(),
            name: name.clone(),
            messages: self.messages.clone(),
            created_at,
            updated_at: now,
        };

        self.chats.retain(|c| c.id != id);
        self.chats.insert(0, chat);
        self.chats.truncate(MAX_CHAT_HISTORY);

        self.current_chat_id = Some(id);
        self.chat_name = name;
        true
    }

    /// Replaces the active transcript with a chat from the history.
    ///
    /// The currently active transcript is saved first when non-empty, so
    /// switching context never loses messages. Returns false when no chat
    /// with the given id exists.
    pub fn load_chat(&mut self, chat_id: &str) -> bool {
        if !self.chats.iter().any(|c| c.id == chat_id) {
            return false;
        }

        if !self.messages.is_empty() {
            self.save_current_chat();
        }

        // The save above can only drop the history tail, but re-check
        // rather than assume the target survived truncation.
        let Some(chat) = self.chats.iter().find(|c| c.id == chat_id).cloned() else {
            return false;
        };

        self.messages = chat.messages;
        self.current_chat_id = Some(chat.id);
        self.chat_name = chat.name;
        self.processing = false;
        if self.praise_mode.is_automatic() {
            self.praise_volume = 0;
        }
        true
    }

    /// Removes a chat from the history by id.
    ///
    /// When the removed chat was the active one, the active transcript and
    /// id are cleared as well. Returns true when an entry was removed.
    pub fn delete_chat(&mut self, chat_id: &str) -> bool {
        let before = self.chats.len();
        self.chats.retain(|c| c.id != chat_id);
        if self.chats.len() == before {
            return false;
        }

        if self.current_chat_id.as_deref() == Some(chat_id) {
            self.messages.clear();
            self.current_chat_id = None;
            self.chat_name.clear();
        }
        true
    }

    /// Saves the active transcript (if non-empty) and starts a fresh one.
    ///
    /// All settings fields are preserved; only the transcript, the active
    /// id and the explicit chat name are cleared.
    pub fn new_chat(&mut self) {
        if !self.messages.is_empty() {
            self.save_current_chat();
        }

        self.messages.clear();
        self.current_chat_id = None;
        self.chat_name.clear();
        self.processing = false;
        self.praise_volume = if self.praise_mode.is_automatic() {
            0
        } else {
            DEFAULT_MANUAL_VOLUME
        };
    }

    /// Renames a history entry; when it is the active chat the live chat
    /// name follows. A blank name is ignored.
    pub fn rename_chat(&mut self, chat_id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(chat) = self.chats.iter_mut().find(|c| c.id == chat_id) else {
            return false;
        };
        chat.name = name.to_string();
        if self.current_chat_id.as_deref() == Some(chat_id) {
            self.chat_name = name.to_string();
        }
        true
    }

    // ------------------------------------------------------------------
    // Settings field operations
    // ------------------------------------------------------------------

    pub fn set_person_info(&mut self, info: Option<PersonInfo>) {
        self.person_info = info;
    }

    pub fn set_site_name(&mut self, name: impl Into<String>) {
        self.site_name = name.into();
    }

    pub fn set_site_subtitle(&mut self, subtitle: impl Into<String>) {
        self.site_subtitle = subtitle.into();
    }

    pub fn set_praise_bar_visible(&mut self, visible: bool) {
        self.praise_bar_visible = visible;
    }

    /// Sets the stored manual volume, clamped to `[0, 100]`.
    pub fn set_manual_praise_volume(&mut self, value: i32) {
        self.manual_praise_volume = clamp_volume(value);
    }

    /// Switches the praise mode and resets the transient volume.
    ///
    /// Automatic modes drive the volume from an external timer and must
    /// start from silence; manual mode returns to the audible baseline.
    pub fn set_praise_mode(&mut self, mode: PraiseMode) {
        self.praise_mode = mode;
        self.praise_volume = if mode.is_automatic() {
            0
        } else {
            DEFAULT_MANUAL_VOLUME
        };
    }

    // ------------------------------------------------------------------
    // Transient (session-only) operations
    // ------------------------------------------------------------------

    /// Sets the transient praise volume, clamped to `[0, 100]`.
    pub fn set_praise_volume(&mut self, value: i32) {
        self.praise_volume = clamp_volume(value);
    }

    pub fn set_processing(&mut self, value: bool) {
        self.processing = value;
    }

    pub fn set_ui_language(&mut self, language: Language) {
        self.ui_language = language;
    }

    /// Sets an explicit name for the active chat, used on the next save
    /// instead of the derived one.
    pub fn set_chat_name(&mut self, name: impl Into<String>) {
        self.chat_name = name.into();
    }

    /// Restores every field to its hard-coded default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ------------------------------------------------------------------
    // Settings document conversion
    // ------------------------------------------------------------------

    /// Assembles the persisted settings document from the current state.
    pub fn settings(&self) -> Settings {
        Settings {
            person_info: self.person_info.clone(),
            praise_bar_visible: self.praise_bar_visible,
            praise_mode: self.praise_mode,
            manual_praise_volume: self.manual_praise_volume,
            site_name: self.site_name.clone(),
            site_subtitle: self.site_subtitle.clone(),
            chats: self.chats.clone(),
        }
    }

    /// Applies a loaded settings document in one batched update.
    ///
    /// Used by the load sequence so observers never see a partially
    /// applied document. The automatic-mode volume reset applies here as
    /// well: a restored automatic mode starts silent.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.person_info = settings.person_info;
        self.praise_bar_visible = settings.praise_bar_visible;
        self.praise_mode = settings.praise_mode;
        self.manual_praise_volume = settings.manual_praise_volume.min(100);
        self.site_name = settings.site_name;
        self.site_subtitle = settings.site_subtitle;
        self.chats = settings.chats;
        if self.praise_mode.is_automatic() {
            self.praise_volume = 0;
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn current_chat_id(&self) -> Option<&str> {
        self.current_chat_id.as_deref()
    }

    pub fn chat_name(&self) -> &str {
        &self.chat_name
    }

    pub fn person_info(&self) -> Option<&PersonInfo> {
        self.person_info.as_ref()
    }

    pub fn praise_volume(&self) -> u8 {
        self.praise_volume
    }

    pub fn praise_bar_visible(&self) -> bool {
        self.praise_bar_visible
    }

    pub fn praise_mode(&self) -> PraiseMode {
        self.praise_mode
    }

    pub fn manual_praise_volume(&self) -> u8 {
        self.manual_praise_volume
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn ui_language(&self) -> Language {
        self.ui_language
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn site_subtitle(&self) -> &str {
        &self.site_subtitle
    }
}
