//! Settings repository trait.
//!
//! Defines the interface for settings persistence operations.

use super::model::Settings;
use anyhow::Result;
use async_trait::async_trait;

/// An abstract repository for the singleton settings document.
///
/// This trait defines the contract for persisting and retrieving the
/// settings document, decoupling the application's core logic from the
/// specific storage mechanism (local file cache, remote blob endpoint,
/// or a mirror composing both).
///
/// # Implementation Notes
///
/// The remote document has no versioning or locking: the last writer
/// wins, and concurrent writers can silently overwrite each other. This
/// is an accepted limitation of the storage model, not something an
/// implementation should try to paper over.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the settings document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Settings))`: A stored document was found; missing fields
    ///   have already been filled from defaults.
    /// - `Ok(None)`: Nothing stored yet
    /// - `Err(_)`: Error occurred during retrieval
    async fn load(&self) -> Result<Option<Settings>>;

    /// Saves the settings document, overwriting the previous one.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Document saved successfully
    /// - `Err(_)`: Error occurred during save
    async fn save(&self, settings: &Settings) -> Result<()>;
}
