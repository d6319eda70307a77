//! Local write-through settings cache.
//!
//! `SettingsCache` is the typed view over [`CacheStore`]: one cache key
//! per settings field, written synchronously on every field change so
//! reads stay fast while the remote store remains authoritative.
//!
//! Malformed entries are treated as absent and fall back to defaults at
//! merge time; a corrupt cache can degrade freshness but never startup.

use crate::cache_store::CacheStore;
use crate::paths::PraiserPaths;
use anyhow::{Context, Result};
use async_trait::async_trait;
use praiser_core::session::Chat;
use praiser_core::settings::{
    PartialSettings, PersonInfo, PraiseMode, Settings, SettingsRepository, merge_defaults,
};
use std::path::Path;

const KEY_PERSON_INFO: &str = "person-info";
const KEY_PRAISE_BAR_VISIBLE: &str = "praise-bar-visible";
const KEY_PRAISE_MODE: &str = "praise-mode";
const KEY_MANUAL_PRAISE_VOLUME: &str = "manual-praise-volume";
const KEY_SITE_NAME: &str = "site-name";
const KEY_SITE_SUBTITLE: &str = "site-subtitle";
const KEY_CHATS: &str = "chats";

/// Typed settings cache over a key→string store.
pub struct SettingsCache {
    store: CacheStore,
}

impl SettingsCache {
    /// Creates a settings cache rooted at the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            store: CacheStore::new(base_dir)?,
        })
    }

    /// Creates a settings cache at the default platform location.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined or
    /// created.
    pub fn default_location() -> Result<Self> {
        let base_dir = PraiserPaths::cache_dir()
            .map_err(|e| anyhow::anyhow!("Failed to resolve cache directory: {}", e))?;
        Self::new(base_dir)
    }

    // ------------------------------------------------------------------
    // Per-field writers (write-through on every change)
    // ------------------------------------------------------------------

    pub fn write_person_info(&self, info: Option<&PersonInfo>) -> Result<()> {
        match info {
            Some(info) => {
                let json =
                    serde_json::to_string(info).context("Failed to serialize person info")?;
                self.store.put(KEY_PERSON_INFO, &json)
            }
            None => self.store.remove(KEY_PERSON_INFO),
        }
    }

    pub fn write_praise_bar_visible(&self, visible: bool) -> Result<()> {
        self.store
            .put(KEY_PRAISE_BAR_VISIBLE, if visible { "true" } else { "false" })
    }

    pub fn write_praise_mode(&self, mode: PraiseMode) -> Result<()> {
        self.store.put(KEY_PRAISE_MODE, mode.as_str())
    }

    pub fn write_manual_praise_volume(&self, volume: u8) -> Result<()> {
        self.store
            .put(KEY_MANUAL_PRAISE_VOLUME, &volume.to_string())
    }

    pub fn write_site_name(&self, name: &str) -> Result<()> {
        self.store.put(KEY_SITE_NAME, name)
    }

    pub fn write_site_subtitle(&self, subtitle: &str) -> Result<()> {
        self.store.put(KEY_SITE_SUBTITLE, subtitle)
    }

    pub fn write_chats(&self, chats: &[Chat]) -> Result<()> {
        let json = serde_json::to_string(chats).context("Failed to serialize chat history")?;
        self.store.put(KEY_CHATS, &json)
    }

    /// Mirrors a full settings document into the cache, field by field.
    pub fn write_all(&self, settings: &Settings) -> Result<()> {
        self.write_person_info(settings.person_info.as_ref())?;
        self.write_praise_bar_visible(settings.praise_bar_visible)?;
        self.write_praise_mode(settings.praise_mode)?;
        self.write_manual_praise_volume(settings.manual_praise_volume)?;
        self.write_site_name(&settings.site_name)?;
        self.write_site_subtitle(&settings.site_subtitle)?;
        self.write_chats(&settings.chats)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------

    /// Reads the cached chat history, used once at store construction to
    /// seed the history list.
    ///
    /// A missing or malformed entry yields an empty history.
    pub fn chats(&self) -> Vec<Chat> {
        let Some(raw) = self.store.get(KEY_CHATS) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(chats) => chats,
            Err(e) => {
                tracing::warn!(error = %e, "Cached chat history is malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Assembles a partial settings document from the cached entries.
    ///
    /// Each field parses independently; a malformed entry is treated as
    /// absent so one bad value cannot take the rest of the cache down.
    pub fn load_partial(&self) -> PartialSettings {
        let person_info = self.store.get(KEY_PERSON_INFO).and_then(|raw| {
            serde_json::from_str(&raw)
                .map_err(|e| {
                    tracing::warn!(error = %e, "Cached person info is malformed, ignoring");
                    e
                })
                .ok()
        });

        let praise_bar_visible = self
            .store
            .get(KEY_PRAISE_BAR_VISIBLE)
            .and_then(|raw| match raw.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            });

        let praise_mode = self
            .store
            .get(KEY_PRAISE_MODE)
            .and_then(|raw| PraiseMode::parse(raw.trim()));

        let manual_praise_volume = self
            .store
            .get(KEY_MANUAL_PRAISE_VOLUME)
            .and_then(|raw| raw.trim().parse::<u8>().ok());

        let chats = self.store.get(KEY_CHATS).and_then(|raw| {
            serde_json::from_str(&raw)
                .map_err(|e| {
                    tracing::warn!(error = %e, "Cached chat history is malformed, ignoring");
                    e
                })
                .ok()
        });

        PartialSettings {
            person_info,
            praise_bar_visible,
            praise_mode,
            manual_praise_volume,
            site_name: self.store.get(KEY_SITE_NAME),
            site_subtitle: self.store.get(KEY_SITE_SUBTITLE),
            chats,
        }
    }
}

#[async_trait]
impl SettingsRepository for SettingsCache {
    async fn load(&self) -> Result<Option<Settings>> {
        let partial = self.load_partial();
        if partial.is_empty() {
            return Ok(None);
        }
        Ok(Some(merge_defaults(partial)))
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        self.write_all(settings)
    }
}
