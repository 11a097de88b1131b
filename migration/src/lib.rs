//! Settings document migrations.
//!
//! The settings document is versioned through its `schema_version` key. Every
//! historical version has exactly one migration that lifts it to the next
//! version; `Migrator::up` composes them in order so a document of any past
//! version reaches `CURRENT_VERSION`. Migrations are pure functions over
//! `serde_json::Value` and never touch the filesystem.
//!
//! # Versions
//!
//! - **0** - legacy `settings.json`, an object keyed by guild id using the flat
//!   key names of the original cog
//! - **1** - `{schema_version, configs}` with current field names
//! - **2** - prestige tiers as an ordered list
//! - **3** - ranges as `{min, max}` objects, tagged emojis, global section

use serde_json::{Map, Value};
use thiserror::Error;

mod m0001_flatten_legacy_guilds;
mod m0002_prestige_tiers;
mod m0003_ranges_and_emojis;

#[cfg(test)]
mod test;

/// Schema version produced by the last migration.
pub const CURRENT_VERSION: u64 = 3;

/// Key holding the schema version at the document root.
pub const VERSION_KEY: &str = "schema_version";

#[derive(Error, Debug)]
pub enum MigrationError {
    /// The document could not be parsed or deserialized.
    #[error("Settings document is unreadable: {0}")]
    Unreadable(#[from] serde_json::Error),

    /// The document was written by a newer release.
    #[error("Settings document version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u64 },

    /// A value does not have the shape its version requires.
    #[error("Invalid settings document at '{path}': {reason}")]
    InvalidStructure { path: String, reason: String },
}

impl MigrationError {
    pub(crate) fn invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidStructure {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A single version-to-version transform.
pub trait MigrationTrait {
    /// Human readable migration name used in logs.
    fn name(&self) -> &'static str;

    /// Version this migration upgrades from. It produces `from_version() + 1`.
    fn from_version(&self) -> u64;

    /// Transforms a document of `from_version()` into the next version.
    ///
    /// # Arguments
    /// - `document` - Document at `from_version()`
    ///
    /// # Returns
    /// - `Ok(Value)` - Document at `from_version() + 1`
    /// - `Err(MigrationError::InvalidStructure)` - Document does not match its version
    fn up(&self, document: Value) -> Result<Value, MigrationError>;
}

pub struct Migrator;

impl Migrator {
    /// All migrations in the order they must be applied.
    pub fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m0001_flatten_legacy_guilds::Migration),
            Box::new(m0002_prestige_tiers::Migration),
            Box::new(m0003_ranges_and_emojis::Migration),
        ]
    }

    /// Reads the schema version of a document.
    ///
    /// Documents without a `schema_version` key are legacy (version 0).
    ///
    /// # Arguments
    /// - `document` - Settings document of any version
    ///
    /// # Returns
    /// - `Ok(u64)` - Detected schema version
    /// - `Err(MigrationError::InvalidStructure)` - Root is not an object or the version is not an integer
    /// - `Err(MigrationError::UnsupportedVersion)` - Version is newer than `CURRENT_VERSION`
    pub fn detect_version(document: &Value) -> Result<u64, MigrationError> {
        let root = document
            .as_object()
            .ok_or_else(|| MigrationError::invalid("$", "document root must be an object"))?;

        let version = match root.get(VERSION_KEY) {
            None => 0,
            Some(value) => value.as_u64().ok_or_else(|| {
                MigrationError::invalid(VERSION_KEY, "schema version must be a non-negative integer")
            })?,
        };

        if version > CURRENT_VERSION {
            return Err(MigrationError::UnsupportedVersion {
                found: version,
                supported: CURRENT_VERSION,
            });
        }

        Ok(version)
    }

    /// Applies every pending migration to a document.
    ///
    /// A document already at `CURRENT_VERSION` is returned unchanged.
    ///
    /// # Arguments
    /// - `document` - Settings document of any supported version
    ///
    /// # Returns
    /// - `Ok(Value)` - Document at `CURRENT_VERSION`
    /// - `Err(MigrationError)` - Version detection or one of the migrations failed
    pub fn up(mut document: Value) -> Result<Value, MigrationError> {
        let mut version = Self::detect_version(&document)?;

        for migration in Self::migrations() {
            if migration.from_version() != version {
                continue;
            }

            tracing::info!(
                "Applying settings migration {} (v{} -> v{})",
                migration.name(),
                version,
                version + 1
            );
            document = migration.up(document)?;
            version += 1;
        }

        Ok(document)
    }
}

/// Returns the `configs` object of a versioned document.
pub(crate) fn configs_mut(document: &mut Value) -> Result<&mut Map<String, Value>, MigrationError> {
    document
        .get_mut("configs")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| MigrationError::invalid("configs", "expected an object keyed by guild id"))
}

/// Returns a guild entry as an object.
pub(crate) fn guild_object<'a>(
    guild_id: &str,
    guild: &'a mut Value,
) -> Result<&'a mut Map<String, Value>, MigrationError> {
    guild
        .as_object_mut()
        .ok_or_else(|| MigrationError::invalid(format!("configs.{}", guild_id), "expected an object"))
}

/// Parses a stored emoji into the tagged representation.
///
/// Numeric values and custom emoji markup (`<:name:id>`, `<a:name:id>`) become
/// `{"custom": id}`; any other string becomes `{"unicode": text}`. Values that
/// are already tagged are returned as-is.
pub(crate) fn tag_emoji(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => n.as_u64().map(|id| serde_json::json!({ "custom": id })),
        Value::String(text) => {
            let custom_id = text
                .strip_prefix('<')
                .and_then(|rest| rest.strip_suffix('>'))
                .and_then(|inner| inner.rsplit(':').next())
                .and_then(|id| id.parse::<u64>().ok())
                .or_else(|| text.parse::<u64>().ok());

            Some(match custom_id {
                Some(id) => serde_json::json!({ "custom": id }),
                None => serde_json::json!({ "unicode": text }),
            })
        }
        Value::Object(map) if map.contains_key("custom") || map.contains_key("unicode") => {
            Some(value.clone())
        }
        _ => None,
    }
}
