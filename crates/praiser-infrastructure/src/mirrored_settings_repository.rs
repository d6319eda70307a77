//! Best-effort mirroring between the remote store and the local cache.
//!
//! The remote store is the system of record; the local cache is a
//! write-through accelerator and the fallback when the remote is
//! unreachable. Persistence failures degrade silently: loads fall back
//! to cached data (or nothing), saves keep the local copy and let the
//! next save act as the retry. No error from this repository reaches the
//! UI surface.

use crate::settings_cache::SettingsCache;
use anyhow::Result;
use async_trait::async_trait;
use praiser_core::settings::{Settings, SettingsRepository};
use std::sync::Arc;

/// Composes a remote repository with the local cache.
pub struct MirroredSettingsRepository {
    remote: Arc<dyn SettingsRepository>,
    cache: Arc<SettingsCache>,
}

impl MirroredSettingsRepository {
    pub fn new(remote: Arc<dyn SettingsRepository>, cache: Arc<SettingsCache>) -> Self {
        Self { remote, cache }
    }
}

#[async_trait]
impl SettingsRepository for MirroredSettingsRepository {
    /// Loads from the remote store, mirroring a successful result into
    /// the cache; any remote failure falls back to the cached copy.
    async fn load(&self) -> Result<Option<Settings>> {
        match self.remote.load().await {
            Ok(Some(settings)) => {
                if let Err(e) = self.cache.write_all(&settings) {
                    tracing::error!(error = %e, "Failed to mirror loaded settings into cache");
                }
                Ok(Some(settings))
            }
            Ok(None) => {
                tracing::debug!("Remote store holds no settings yet, trying cache");
                self.cache.load().await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Remote settings fetch failed, falling back to cache");
                self.cache.load().await
            }
        }
    }

    /// Writes the cache synchronously, then the remote store.
    ///
    /// Remote failures are logged and swallowed: the cache already holds
    /// the latest value, so nothing is lost client-side and the next save
    /// overwrites the stale remote copy. There is no retry state.
    async fn save(&self, settings: &Settings) -> Result<()> {
        if let Err(e) = self.cache.write_all(settings) {
            tracing::error!(error = %e, "Failed to write settings to local cache");
        }

        if let Err(e) = self.remote.save(settings).await {
            tracing::warn!(error = %e, "Remote settings save failed, local cache holds the latest copy");
        }

        Ok(())
    }
}
