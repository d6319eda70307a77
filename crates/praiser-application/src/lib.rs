//! Application layer for Praiser.
//!
//! This crate wires the domain and storage layers together: the
//! `SessionService` context object that a UI embeds, the settings sync
//! bridge with its debounced persistence, and logging setup.

pub mod debounce;
pub mod logging;
pub mod session_service;
pub mod sync_bridge;

pub use debounce::DebounceSlot;
pub use session_service::SessionService;
pub use sync_bridge::SettingsSyncBridge;
