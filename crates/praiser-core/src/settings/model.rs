//! Settings domain model.
//!
//! `Settings` is the singleton document reconciled between the session
//! store, the local durable cache and the remote settings endpoint. The
//! wire format (camelCase JSON) matches what the endpoint stores.

use crate::session::Chat;
use serde::{Deserialize, Serialize};

/// Default site name applied when nothing has been configured.
pub const DEFAULT_SITE_NAME: &str = "Praiser";
/// Default site subtitle applied when nothing has been configured.
pub const DEFAULT_SITE_SUBTITLE: &str = "AI Praise Assistant";
/// Default praise volume for manual mode.
pub const DEFAULT_MANUAL_VOLUME: u8 = 70;

/// How the praise bar volume is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PraiseMode {
    /// Volume jumps randomly, driven by an external timer.
    AutoRandom,
    /// Volume ramps up over time, driven by an external animation.
    Crescendo,
    /// Volume is set by the user.
    #[default]
    Manual,
}

impl PraiseMode {
    /// Returns true for the modes whose volume is computed externally.
    ///
    /// Automatic modes must start from silence, so the transient praise
    /// volume is forced to zero whenever one of them becomes active.
    pub fn is_automatic(&self) -> bool {
        matches!(self, Self::AutoRandom | Self::Crescendo)
    }

    /// The wire name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoRandom => "auto-random",
            Self::Crescendo => "crescendo",
            Self::Manual => "manual",
        }
    }

    /// Parses a wire name back into a mode.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto-random" => Some(Self::AutoRandom),
            "crescendo" => Some(Self::Crescendo),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// UI display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    El,
}

/// Free-form profile data about the person being praised.
///
/// Opaque to the core logic; the assistant layer interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersonInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub extra_info: String,
}

/// The singleton settings document.
///
/// Persisted as a whole: the remote endpoint stores exactly this object
/// under a single well-known key, and the local cache mirrors it field
/// by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub person_info: Option<PersonInfo>,
    pub praise_bar_visible: bool,
    pub praise_mode: PraiseMode,
    pub manual_praise_volume: u8,
    pub site_name: String,
    pub site_subtitle: String,
    pub chats: Vec<Chat>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            person_info: None,
            praise_bar_visible: true,
            praise_mode: PraiseMode::Manual,
            manual_praise_volume: DEFAULT_MANUAL_VOLUME,
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_subtitle: DEFAULT_SITE_SUBTITLE.to_string(),
            chats: Vec::new(),
        }
    }
}

/// A settings document as read from storage, where any field may be
/// missing.
///
/// Tolerates schema evolution: older payloads simply leave newer fields
/// absent, and [`merge_defaults`] fills the gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialSettings {
    #[serde(default)]
    pub person_info: Option<PersonInfo>,
    #[serde(default)]
    pub praise_bar_visible: Option<bool>,
    #[serde(default)]
    pub praise_mode: Option<PraiseMode>,
    #[serde(default)]
    pub manual_praise_volume: Option<u8>,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub site_subtitle: Option<String>,
    #[serde(default)]
    pub chats: Option<Vec<Chat>>,
}

impl PartialSettings {
    /// Returns true when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.person_info.is_none()
            && self.praise_bar_visible.is_none()
            && self.praise_mode.is_none()
            && self.manual_praise_volume.is_none()
            && self.site_name.is_none()
            && self.site_subtitle.is_none()
            && self.chats.is_none()
    }
}

/// Clamps a praise volume to the valid `[0, 100]` range.
pub fn clamp_volume(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// Shallow-merges a loaded partial document over the hard-coded defaults.
///
/// Loaded fields win; missing fields fall back to the default value. The
/// manual volume is clamped rather than rejected so a stored out-of-range
/// value cannot poison the document.
pub fn merge_defaults(partial: PartialSettings) -> Settings {
    let defaults = Settings::default();
    Settings {
        person_info: partial.person_info.or(defaults.person_info),
        praise_bar_visible: partial
            .praise_bar_visible
            .unwrap_or(defaults.praise_bar_visible),
        praise_mode: partial.praise_mode.unwrap_or(defaults.praise_mode),
        manual_praise_volume: partial
            .manual_praise_volume
            .map(|v| v.min(100))
            .unwrap_or(defaults.manual_praise_volume),
        site_name: partial.site_name.unwrap_or(defaults.site_name),
        site_subtitle: partial.site_subtitle.unwrap_or(defaults.site_subtitle),
        chats: partial.chats.unwrap_or(defaults.chats),
    }
}
