//! The settings document root.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::settings::GuildSettings;

/// Options only the bot operator can change. Shared by every guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// How long rendered profiles are cached, in seconds. Zero disables caching.
    pub cache_seconds: u64,
    /// Render animated profiles as GIFs instead of static images.
    pub render_gifs: bool,
}

/// Complete settings document: every guild's settings plus the global section.
///
/// This is what gets snapshotted to disk and restored on startup. It must
/// round-trip through serde without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Db {
    pub schema_version: u64,
    #[serde(default)]
    pub global: GlobalSettings,
    #[serde(default)]
    pub configs: BTreeMap<u64, GuildSettings>,
}

impl Default for Db {
    fn default() -> Self {
        Self {
            schema_version: migration::CURRENT_VERSION,
            global: GlobalSettings::default(),
            configs: BTreeMap::new(),
        }
    }
}
