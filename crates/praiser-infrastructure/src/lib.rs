//! Storage layer for Praiser.
//!
//! This crate provides the concrete persistence backends behind the
//! `SettingsRepository` interface: the local key→string cache, the
//! remote settings endpoint client, and the best-effort mirror policy
//! that composes them. It also owns platform path resolution and
//! configuration loading.

pub mod cache_store;
pub mod config_service;
pub mod mirrored_settings_repository;
pub mod paths;
pub mod remote_settings_repository;
pub mod settings_cache;

pub use crate::cache_store::CacheStore;
pub use crate::config_service::load_config;
pub use crate::mirrored_settings_repository::MirroredSettingsRepository;
pub use crate::paths::{PathError, PraiserPaths};
pub use crate::remote_settings_repository::RemoteSettingsRepository;
pub use crate::settings_cache::SettingsCache;
