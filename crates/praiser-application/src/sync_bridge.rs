//! Settings synchronization bridge.
//!
//! Reconciles the session store with the persisted settings document:
//! one load at startup (falling back to defaults on any failure), and
//! two save variants — debounced, which coalesces a burst of edits into
//! one write, and immediate, for transitions that must not be lost.
//!
//! The load path never propagates an error past this boundary: whatever
//! the repository does, the caller receives a usable document.

use crate::debounce::DebounceSlot;
use praiser_core::settings::{Settings, SettingsRepository};
use std::sync::Arc;
use std::time::Duration;

pub struct SettingsSyncBridge {
    repository: Arc<dyn SettingsRepository>,
    slot: DebounceSlot,
    delay: Duration,
}

impl SettingsSyncBridge {
    /// Creates a bridge over the given repository with the given
    /// debounce delay.
    pub fn new(repository: Arc<dyn SettingsRepository>, delay: Duration) -> Self {
        Self {
            repository,
            slot: DebounceSlot::new(),
            delay,
        }
    }

    /// Loads the settings document, substituting defaults on absence or
    /// failure. Run once at application start.
    pub async fn load(&self) -> Settings {
        match self.repository.load().await {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                tracing::info!("No stored settings found, using defaults");
                Settings::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Settings load failed, using defaults");
                Settings::default()
            }
        }
    }

    /// Schedules a save after the debounce delay.
    ///
    /// Replaces any pending save, so a burst of rapid edits produces one
    /// write carrying the last snapshot. The write always fires after
    /// the last edit in a burst.
    pub fn save_debounced(self: &Arc<Self>, settings: Settings) {
        let bridge = Arc::clone(self);
        self.slot.schedule(self.delay, async move {
            bridge.write(&settings).await;
        });
    }

    /// Cancels any pending save and writes immediately.
    ///
    /// Reserved for transitions that must not be lost (un-mount, an
    /// explicit "save now").
    pub async fn save_now(&self, settings: Settings) {
        self.slot.cancel();
        self.write(&settings).await;
    }

    /// Cancels any pending debounced save.
    pub fn cancel_pending(&self) {
        self.slot.cancel();
    }

    async fn write(&self, settings: &Settings) {
        if let Err(e) = self.repository.save(settings).await {
            // Not retried here: the next debounced save overwrites the
            // stale remote copy anyway.
            tracing::warn!(error = %e, "Settings save failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingRepository {
        stored: Mutex<Option<Settings>>,
        save_calls: AtomicUsize,
        fail_loads: bool,
    }

    impl RecordingRepository {
        fn new(fail_loads: bool) -> Self {
            Self {
                stored: Mutex::new(None),
                save_calls: AtomicUsize::new(0),
                fail_loads,
            }
        }
    }

    #[async_trait]
    impl SettingsRepository for RecordingRepository {
        async fn load(&self) -> Result<Option<Settings>> {
            if self.fail_loads {
                anyhow::bail!("network unreachable");
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, settings: &Settings) -> Result<()> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            *self.stored.lock().unwrap() = Some(settings.clone());
            Ok(())
        }
    }

    fn named(name: &str) -> Settings {
        Settings {
            site_name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_failure_substitutes_defaults() {
        let repository = Arc::new(RecordingRepository::new(true));
        let bridge = SettingsSyncBridge::new(repository, Duration::from_millis(10));

        let settings = bridge.load().await;
        assert_eq!(settings.site_name, "Praiser");
        assert!(settings.chats.is_empty());
    }

    #[tokio::test]
    async fn test_load_absence_substitutes_defaults() {
        let repository = Arc::new(RecordingRepository::new(false));
        let bridge = SettingsSyncBridge::new(repository, Duration::from_millis(10));
        assert_eq!(bridge.load().await, Settings::default());
    }

    #[tokio::test]
    async fn test_debounced_saves_coalesce_into_one_write() {
        let repository = Arc::new(RecordingRepository::new(false));
        let bridge = Arc::new(SettingsSyncBridge::new(
            repository.clone(),
            Duration::from_millis(30),
        ));

        bridge.save_debounced(named("one"));
        bridge.save_debounced(named("two"));
        bridge.save_debounced(named("three"));

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(repository.save_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            repository.stored.lock().unwrap().as_ref().unwrap().site_name,
            "three"
        );
    }

    #[tokio::test]
    async fn test_save_now_cancels_pending_and_writes() {
        let repository = Arc::new(RecordingRepository::new(false));
        let bridge = Arc::new(SettingsSyncBridge::new(
            repository.clone(),
            Duration::from_millis(50),
        ));

        bridge.save_debounced(named("stale"));
        bridge.save_now(named("fresh")).await;

        assert_eq!(repository.save_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            repository.stored.lock().unwrap().as_ref().unwrap().site_name,
            "fresh"
        );

        // The cancelled debounced save never fires.
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(repository.save_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_pending_drops_scheduled_save() {
        let repository = Arc::new(RecordingRepository::new(false));
        let bridge = Arc::new(SettingsSyncBridge::new(
            repository.clone(),
            Duration::from_millis(20),
        ));

        bridge.save_debounced(named("doomed"));
        bridge.cancel_pending();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(repository.save_calls.load(Ordering::SeqCst), 0);
    }
}
