//! Session service: the application-root context object.
//!
//! `SessionService` owns the in-memory [`SessionStore`], the local
//! write-through cache and the sync bridge, and wires every mutation to
//! its persistence side effects. UI components receive this context by
//! injection; there is no ambient global store.
//!
//! Persistence failures never surface through this API: cache write
//! failures are logged, remote failures degrade to cache-only. The UI
//! always has a consistent in-memory state to render.

use crate::debounce::DebounceSlot;
use crate::sync_bridge::SettingsSyncBridge;
use praiser_core::config::SyncConfig;
use praiser_core::export;
use praiser_core::session::{Chat, Message, MessageDraft, SessionStore};
use praiser_core::settings::{Language, PersonInfo, PraiseMode, Settings, SettingsRepository};
use praiser_infrastructure::SettingsCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub struct SessionService {
    store: Arc<RwLock<SessionStore>>,
    cache: Arc<SettingsCache>,
    bridge: Arc<SettingsSyncBridge>,
    /// Pending debounced chat save; separate write class from the
    /// bridge's settings save so the two never cancel each other.
    chat_save: DebounceSlot,
    debounce: Duration,
}

impl SessionService {
    /// Creates the service context.
    ///
    /// The chat history is seeded from the cache right away; the settings
    /// fields keep their defaults until [`initialize`](Self::initialize)
    /// applies the loaded document, so stale values never flash before
    /// the fetch completes.
    pub fn new(
        cache: Arc<SettingsCache>,
        repository: Arc<dyn SettingsRepository>,
        sync: &SyncConfig,
    ) -> Self {
        let history = cache.chats();
        let delay = Duration::from_millis(sync.debounce_ms);
        Self {
            store: Arc::new(RwLock::new(SessionStore::with_history(history))),
            cache,
            bridge: Arc::new(SettingsSyncBridge::new(repository, delay)),
            chat_save: DebounceSlot::new(),
            debounce: delay,
        }
    }

    /// Runs the load sequence once at application start.
    ///
    /// Fetches the settings document (defaults on any failure), applies
    /// it to the store in one batched update, and mirrors every applied
    /// field into the cache.
    pub async fn initialize(&self) {
        let settings = self.bridge.load().await;
        {
            let mut store = self.store.write().await;
            store.apply_settings(settings.clone());
        }
        if let Err(e) = self.cache.write_all(&settings) {
            tracing::error!(error = %e, "Failed to mirror loaded settings into cache");
        }
    }

    // ------------------------------------------------------------------
    // Transcript operations
    // ------------------------------------------------------------------

    /// Appends a message to the active transcript and schedules a
    /// debounced save of the active chat.
    pub async fn add_message(&self, draft: MessageDraft) -> Message {
        let message = {
            let mut store = self.store.write().await;
            store.add_message(draft).clone()
        };
        self.schedule_chat_save();
        message
    }

    /// Appends several messages and schedules a debounced chat save.
    pub async fn append_messages(&self, drafts: Vec<MessageDraft>) {
        {
            let mut store = self.store.write().await;
            store.append_messages(drafts);
        }
        self.schedule_chat_save();
    }

    /// Saves the active chat now (no-op on an empty transcript) and
    /// persists the updated history.
    pub async fn save_current_chat(&self) {
        let snapshot = {
            let mut store = self.store.write().await;
            if store.save_current_chat() {
                Some((store.chats().to_vec(), store.settings()))
            } else {
                None
            }
        };
        if let Some((chats, settings)) = snapshot {
            self.persist_history(&chats, settings);
        }
    }

    /// Switches the active transcript to a chat from the history.
    ///
    /// Cancels any pending debounced chat save first: a stale timer must
    /// not clobber the transcript we are about to replace. The current
    /// transcript is saved synchronously before the switch.
    pub async fn load_chat(&self, chat_id: &str) -> bool {
        self.chat_save.cancel();
        let snapshot = {
            let mut store = self.store.write().await;
            if store.load_chat(chat_id) {
                Some((store.chats().to_vec(), store.settings()))
            } else {
                None
            }
        };
        match snapshot {
            Some((chats, settings)) => {
                self.persist_history(&chats, settings);
                true
            }
            None => false,
        }
    }

    /// Removes a chat from the history, clearing the active transcript
    /// when it was the one removed. The history is written to the cache
    /// synchronously; the remote write is debounced.
    pub async fn delete_chat(&self, chat_id: &str) -> bool {
        let snapshot = {
            let mut store = self.store.write().await;
            if store.delete_chat(chat_id) {
                Some((store.chats().to_vec(), store.settings()))
            } else {
                None
            }
        };
        match snapshot {
            Some((chats, settings)) => {
                self.persist_history(&chats, settings);
                true
            }
            None => false,
        }
    }

    /// Saves the current transcript (if non-empty) and starts a fresh
    /// chat, cancelling any pending chat save first.
    pub async fn new_chat(&self) {
        self.chat_save.cancel();
        let (chats, settings) = {
            let mut store = self.store.write().await;
            store.new_chat();
            (store.chats().to_vec(), store.settings())
        };
        self.persist_history(&chats, settings);
    }

    /// Renames a history entry.
    pub async fn rename_chat(&self, chat_id: &str, name: &str) -> bool {
        let snapshot = {
            let mut store = self.store.write().await;
            if store.rename_chat(chat_id, name) {
                Some((store.chats().to_vec(), store.settings()))
            } else {
                None
            }
        };
        match snapshot {
            Some((chats, settings)) => {
                self.persist_history(&chats, settings);
                true
            }
            None => false,
        }
    }

    /// Renders a saved chat as a plain-text transcript for download.
    ///
    /// Returns the suggested file name and the transcript body, or
    /// `None` for an unknown id or an empty chat.
    pub async fn export_chat(&self, chat_id: &str) -> Option<(String, String)> {
        let store = self.store.read().await;
        store
            .chats()
            .iter()
            .find(|c| c.id == chat_id && !c.messages.is_empty())
            .map(|chat| (export::export_file_name(chat), export::transcript_text(chat)))
    }

    // ------------------------------------------------------------------
    // Settings field operations (write-through + debounced remote save)
    // ------------------------------------------------------------------

    pub async fn set_person_info(&self, info: Option<PersonInfo>) {
        let settings = {
            let mut store = self.store.write().await;
            store.set_person_info(info);
            store.settings()
        };
        if let Err(e) = self.cache.write_person_info(settings.person_info.as_ref()) {
            tracing::error!(error = %e, "Failed to write person info to cache");
        }
        self.bridge.save_debounced(settings);
    }

    pub async fn set_site_name(&self, name: impl Into<String>) {
        let settings = {
            let mut store = self.store.write().await;
            store.set_site_name(name);
            store.settings()
        };
        if let Err(e) = self.cache.write_site_name(&settings.site_name) {
            tracing::error!(error = %e, "Failed to write site name to cache");
        }
        self.bridge.save_debounced(settings);
    }

    pub async fn set_site_subtitle(&self, subtitle: impl Into<String>) {
        let settings = {
            let mut store = self.store.write().await;
            store.set_site_subtitle(subtitle);
            store.settings()
        };
        if let Err(e) = self.cache.write_site_subtitle(&settings.site_subtitle) {
            tracing::error!(error = %e, "Failed to write site subtitle to cache");
        }
        self.bridge.save_debounced(settings);
    }

    pub async fn set_praise_bar_visible(&self, visible: bool) {
        let settings = {
            let mut store = self.store.write().await;
            store.set_praise_bar_visible(visible);
            store.settings()
        };
        if let Err(e) = self.cache.write_praise_bar_visible(settings.praise_bar_visible) {
            tracing::error!(error = %e, "Failed to write praise bar visibility to cache");
        }
        self.bridge.save_debounced(settings);
    }

    /// Sets the stored manual volume, clamped to `[0, 100]`.
    pub async fn set_manual_praise_volume(&self, value: i32) {
        let settings = {
            let mut store = self.store.write().await;
            store.set_manual_praise_volume(value);
            store.settings()
        };
        if let Err(e) = self
            .cache
            .write_manual_praise_volume(settings.manual_praise_volume)
        {
            tracing::error!(error = %e, "Failed to write manual praise volume to cache");
        }
        self.bridge.save_debounced(settings);
    }

    /// Switches the praise mode; the transient volume resets to 0 for
    /// the automatic modes, 70 for manual.
    pub async fn set_praise_mode(&self, mode: PraiseMode) {
        let settings = {
            let mut store = self.store.write().await;
            store.set_praise_mode(mode);
            store.settings()
        };
        if let Err(e) = self.cache.write_praise_mode(settings.praise_mode) {
            tracing::error!(error = %e, "Failed to write praise mode to cache");
        }
        self.bridge.save_debounced(settings);
    }

    // ------------------------------------------------------------------
    // Transient (session-only) operations — no persistence
    // ------------------------------------------------------------------

    pub async fn set_praise_volume(&self, value: i32) {
        self.store.write().await.set_praise_volume(value);
    }

    pub async fn set_processing(&self, value: bool) {
        self.store.write().await.set_processing(value);
    }

    pub async fn set_ui_language(&self, language: Language) {
        self.store.write().await.set_ui_language(language);
    }

    /// Sets an explicit name for the active chat; when the transcript is
    /// non-empty the rename is picked up by a debounced chat save.
    pub async fn set_chat_name(&self, name: impl Into<String>) {
        let has_messages = {
            let mut store = self.store.write().await;
            store.set_chat_name(name);
            !store.messages().is_empty()
        };
        if has_messages {
            self.schedule_chat_save();
        }
    }

    /// Restores every field to its hard-coded default (full state wipe).
    /// Pending saves are cancelled; the wiped state is not persisted.
    pub async fn reset(&self) {
        self.chat_save.cancel();
        self.bridge.cancel_pending();
        self.store.write().await.reset();
    }

    /// Saves everything now: pending debounces are cancelled, the active
    /// chat is saved synchronously, and the settings document is written
    /// immediately. Used on un-mount and for an explicit "save now".
    pub async fn flush(&self) {
        self.chat_save.cancel();
        let (changed_chats, settings) = {
            let mut store = self.store.write().await;
            let changed = store.save_current_chat();
            let chats = if changed {
                Some(store.chats().to_vec())
            } else {
                None
            };
            (chats, store.settings())
        };
        if let Some(chats) = changed_chats {
            if let Err(e) = self.cache.write_chats(&chats) {
                tracing::error!(error = %e, "Failed to write chat history to cache");
            }
        }
        self.bridge.save_now(settings).await;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The shared state container, for UI observation.
    pub fn store(&self) -> Arc<RwLock<SessionStore>> {
        Arc::clone(&self.store)
    }

    /// A snapshot of the current settings document.
    pub async fn settings(&self) -> Settings {
        self.store.read().await.settings()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Writes the history through the cache and schedules a debounced
    /// remote save of the full document.
    fn persist_history(&self, chats: &[Chat], settings: Settings) {
        if let Err(e) = self.cache.write_chats(chats) {
            tracing::error!(error = %e, "Failed to write chat history to cache");
        }
        self.bridge.save_debounced(settings);
    }

    /// Schedules a debounced save of the active chat.
    ///
    /// When the timer fires, the transcript is saved into the history,
    /// the history is written through the cache, and a remote save is
    /// scheduled in turn.
    fn schedule_chat_save(&self) {
        let store = Arc::clone(&self.store);
        let cache = Arc::clone(&self.cache);
        let bridge = Arc::clone(&self.bridge);
        self.chat_save.schedule(self.debounce, async move {
            let snapshot = {
                let mut store = store.write().await;
                if store.save_current_chat() {
                    Some((store.chats().to_vec(), store.settings()))
                } else {
                    None
                }
            };
            if let Some((chats, settings)) = snapshot {
                if let Err(e) = cache.write_chats(&chats) {
                    tracing::error!(error = %e, "Failed to write chat history to cache");
                }
                bridge.save_debounced(settings);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct MockRemoteRepository {
        stored: Mutex<Option<Settings>>,
        save_calls: AtomicUsize,
        fail: bool,
    }

    impl MockRemoteRepository {
        fn new(fail: bool) -> Self {
            Self {
                stored: Mutex::new(None),
                save_calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl SettingsRepository for MockRemoteRepository {
        async fn load(&self) -> Result<Option<Settings>> {
            if self.fail {
                anyhow::bail!("network unreachable");
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, settings: &Settings) -> Result<()> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("network unreachable");
            }
            *self.stored.lock().unwrap() = Some(settings.clone());
            Ok(())
        }
    }

    fn fast_sync() -> SyncConfig {
        SyncConfig { debounce_ms: 25 }
    }

    fn service_with(
        temp_dir: &TempDir,
        remote: Arc<MockRemoteRepository>,
    ) -> (SessionService, Arc<SettingsCache>) {
        let cache = Arc::new(SettingsCache::new(temp_dir.path()).unwrap());
        let service = SessionService::new(cache.clone(), remote, &fast_sync());
        (service, cache)
    }

    #[tokio::test]
    async fn test_new_chat_before_any_manual_save() {
        let temp_dir = TempDir::new().unwrap();
        let (service, _) = service_with(&temp_dir, Arc::new(MockRemoteRepository::new(false)));

        service.add_message(MessageDraft::user("hello")).await;
        service.new_chat().await;

        let store = service.store();
        let store = store.read().await;
        assert_eq!(store.chats().len(), 1);
        assert_eq!(store.chats()[0].name, "hello");
        assert_eq!(store.chats()[0].messages.len(), 1);
        assert!(store.messages().is_empty());
        assert!(store.current_chat_id().is_none());
    }

    #[tokio::test]
    async fn test_failed_remote_load_populates_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let (service, _) = service_with(&temp_dir, Arc::new(MockRemoteRepository::new(true)));

        service.initialize().await;

        let settings = service.settings().await;
        assert_eq!(settings.site_name, "Praiser");
        assert!(settings.chats.is_empty());
        assert!(settings.praise_bar_visible);
    }

    #[tokio::test]
    async fn test_initialize_applies_remote_settings_in_one_update() {
        let temp_dir = TempDir::new().unwrap();
        let remote = Arc::new(MockRemoteRepository::new(false));
        *remote.stored.lock().unwrap() = Some(Settings {
            site_name: "Remote Name".to_string(),
            praise_mode: PraiseMode::AutoRandom,
            ..Default::default()
        });
        let (service, cache) = service_with(&temp_dir, remote);

        service.initialize().await;

        let store = service.store();
        let store = store.read().await;
        assert_eq!(store.site_name(), "Remote Name");
        assert_eq!(store.praise_mode(), PraiseMode::AutoRandom);
        // Restored automatic mode starts silent.
        assert_eq!(store.praise_volume(), 0);
        // Applied fields were mirrored to the cache.
        assert_eq!(
            cache.load_partial().site_name.as_deref(),
            Some("Remote Name")
        );
    }

    #[tokio::test]
    async fn test_field_setter_writes_cache_before_debounce_fires() {
        let temp_dir = TempDir::new().unwrap();
        let (service, cache) = service_with(&temp_dir, Arc::new(MockRemoteRepository::new(false)));

        service.set_site_name("Typed Immediately").await;

        // Synchronous write-through: visible before any timer fires.
        assert_eq!(
            cache.load_partial().site_name.as_deref(),
            Some("Typed Immediately")
        );
    }

    #[tokio::test]
    async fn test_rapid_edits_coalesce_into_one_remote_write() {
        let temp_dir = TempDir::new().unwrap();
        let remote = Arc::new(MockRemoteRepository::new(false));
        let (service, _) = service_with(&temp_dir, remote.clone());

        service.set_site_name("a").await;
        service.set_site_name("ab").await;
        service.set_site_name("abc").await;

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(remote.save_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            remote.stored.lock().unwrap().as_ref().unwrap().site_name,
            "abc"
        );
    }

    #[tokio::test]
    async fn test_debounced_chat_save_fires_after_quiet_period() {
        let temp_dir = TempDir::new().unwrap();
        let (service, cache) = service_with(&temp_dir, Arc::new(MockRemoteRepository::new(false)));

        service.add_message(MessageDraft::user("will be saved")).await;
        tokio::time::sleep(Duration::from_millis(120)).await;

        let store = service.store();
        let store = store.read().await;
        assert_eq!(store.chats().len(), 1);
        assert_eq!(cache.chats().len(), 1);
        assert_eq!(cache.chats()[0].name, "will be saved");
    }

    #[tokio::test]
    async fn test_volume_clamping_through_the_service() {
        let temp_dir = TempDir::new().unwrap();
        let (service, cache) = service_with(&temp_dir, Arc::new(MockRemoteRepository::new(false)));

        service.set_manual_praise_volume(150).await;
        assert_eq!(service.settings().await.manual_praise_volume, 100);
        assert_eq!(cache.load_partial().manual_praise_volume, Some(100));

        service.set_manual_praise_volume(-5).await;
        assert_eq!(service.settings().await.manual_praise_volume, 0);
    }

    #[tokio::test]
    async fn test_save_delete_reload_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let remote = Arc::new(MockRemoteRepository::new(false));
        let (service, cache) = service_with(&temp_dir, remote.clone());

        service.add_message(MessageDraft::user("ephemeral")).await;
        service.save_current_chat().await;
        let chat_id = {
            let store = service.store();
            let id = store.read().await.chats()[0].id.clone();
            id
        };

        assert!(service.delete_chat(&chat_id).await);
        service.flush().await;

        // A fresh service over the same storage sees a history without
        // the deleted chat.
        let service2 = SessionService::new(cache.clone(), remote, &fast_sync());
        service2.initialize().await;
        let settings = service2.settings().await;
        assert!(settings.chats.iter().all(|c| c.id != chat_id));
    }

    #[tokio::test]
    async fn test_flush_writes_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let remote = Arc::new(MockRemoteRepository::new(false));
        let (service, _) = service_with(&temp_dir, remote.clone());

        service.set_site_name("Must Not Be Lost").await;
        service.flush().await;

        // No sleeping past the debounce: the write already happened.
        assert!(remote.save_calls.load(Ordering::SeqCst) >= 1);
        assert_eq!(
            remote.stored.lock().unwrap().as_ref().unwrap().site_name,
            "Must Not Be Lost"
        );
    }

    #[tokio::test]
    async fn test_history_seeded_from_cache_at_construction() {
        let temp_dir = TempDir::new().unwrap();
        let remote = Arc::new(MockRemoteRepository::new(false));
        let (service, cache) = service_with(&temp_dir, remote.clone());

        service.add_message(MessageDraft::user("persisted chat")).await;
        service.new_chat().await;

        // A second service over the same cache sees the history before
        // any load sequence runs.
        let service2 = SessionService::new(cache, remote, &fast_sync());
        let store = service2.store();
        let store = store.read().await;
        assert_eq!(store.chats().len(), 1);
        assert_eq!(store.chats()[0].name, "persisted chat");
        // Settings fields stay at defaults until initialize() runs.
        assert_eq!(store.site_name(), "Praiser");
    }

    #[tokio::test]
    async fn test_load_chat_switches_transcript_and_cancels_pending_save() {
        let temp_dir = TempDir::new().unwrap();
        let (service, _) = service_with(&temp_dir, Arc::new(MockRemoteRepository::new(false)));

        service.add_message(MessageDraft::user("first chat")).await;
        service.new_chat().await;
        let first_id = {
            let store = service.store();
            let id = store.read().await.chats()[0].id.clone();
            id
        };

        // Start a second transcript; its debounced save is still pending
        // when we switch back.
        service.add_message(MessageDraft::user("second chat")).await;
        assert!(service.load_chat(&first_id).await);

        let store = service.store();
        let store = store.read().await;
        assert_eq!(store.current_chat_id(), Some(first_id.as_str()));
        assert_eq!(store.messages()[0].content, "first chat");
        // Both transcripts survived as history entries.
        assert_eq!(store.chats().len(), 2);
    }

    #[tokio::test]
    async fn test_export_chat_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let (service, _) = service_with(&temp_dir, Arc::new(MockRemoteRepository::new(false)));

        service.add_message(MessageDraft::user("export me")).await;
        service.save_current_chat().await;
        let chat_id = {
            let store = service.store();
            let id = store.read().await.chats()[0].id.clone();
            id
        };

        let (file_name, body) = service.export_chat(&chat_id).await.unwrap();
        assert!(file_name.ends_with(".txt"));
        assert!(body.contains("export me"));

        assert!(service.export_chat("unknown-id").await.is_none());
    }

    #[tokio::test]
    async fn test_reset_restores_defaults_without_persisting() {
        let temp_dir = TempDir::new().unwrap();
        let remote = Arc::new(MockRemoteRepository::new(false));
        let (service, _) = service_with(&temp_dir, remote.clone());

        service.set_site_name("Before Reset").await;
        service.reset().await;

        let settings = service.settings().await;
        assert_eq!(settings.site_name, "Praiser");

        // The pending debounced save was cancelled along with the state.
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(remote.save_calls.load(Ordering::SeqCst), 0);
    }
}
