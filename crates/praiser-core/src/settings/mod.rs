//! Settings domain module.
//!
//! Contains the singleton settings document, the partial form read from
//! storage, the merge-with-defaults rule, and the repository interface.

mod model;
mod repository;

pub use model::{
    DEFAULT_MANUAL_VOLUME, DEFAULT_SITE_NAME, DEFAULT_SITE_SUBTITLE, Language, PartialSettings,
    PersonInfo, PraiseMode, Settings, clamp_volume, merge_defaults,
};
pub use repository::SettingsRepository;
