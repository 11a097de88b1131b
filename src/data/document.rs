//! Settings document persistence.
//!
//! The document is JSON. Loading always passes it through the migration chain,
//! so a current document is a no-op and an older one is upgraded. Writes go to a
//! temporary file that is then renamed over the target.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, MigrationError},
    model::db::Db,
};

/// Where a loaded settings document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    /// The current settings file.
    Current,
    /// The legacy settings file, migrated and written to the current path.
    Legacy,
    /// Neither file existed.
    Fresh,
}

/// Migrates a settings document of any known version into the current schema.
///
/// Migrating an already-current document returns it unchanged.
///
/// # Arguments
/// - `document` - Parsed settings document
///
/// # Returns
/// - `Ok(Db)` - Document in the current schema
/// - `Err(MigrationError)` - Unsupported version or invalid structure
pub fn migrate(document: Value) -> Result<Db, MigrationError> {
    let migrated = migration::Migrator::up(document)?;
    Ok(serde_json::from_value(migrated)?)
}

/// Parses and migrates settings document text.
pub fn parse_document(text: &str) -> Result<Db, MigrationError> {
    let document: Value = serde_json::from_str(text)?;
    migrate(document)
}

/// Receives settings snapshots.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    async fn write(&self, db: &Db) -> Result<(), AppError>;
}

/// Writes snapshots to a JSON file.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSink for JsonFileSink {
    async fn write(&self, db: &Db) -> Result<(), AppError> {
        let text = serde_json::to_vec_pretty(db)?;
        write_atomic(&self.path, &text).await
    }
}

/// Writes `contents` to `path` through a temporary file and a rename.
///
/// Readers see either the previous file or the complete new one.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    tokio::fs::write(&temp, contents).await?;
    tokio::fs::rename(&temp, path).await?;

    Ok(())
}

async fn read_if_exists(path: &Path) -> Result<Option<String>, AppError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Loads the settings document, migrating the legacy file if needed.
///
/// The current file wins when both exist. A legacy document is only written to
/// the current path after it migrated successfully; the legacy file itself is
/// never modified.
///
/// # Arguments
/// - `current_path` - Path of the current settings document
/// - `legacy_path` - Path of the legacy settings document
///
/// # Returns
/// - `Ok((Db, DocumentSource))` - Loaded settings and where they came from
/// - `Err(AppError::MigrationErr)` - A document could not be migrated
/// - `Err(AppError::IoErr)` - A file could not be read or written
pub async fn load_or_migrate(
    current_path: &Path,
    legacy_path: &Path,
) -> Result<(Db, DocumentSource), AppError> {
    if let Some(text) = read_if_exists(current_path).await? {
        let db = parse_document(&text)?;
        tracing::info!(
            "Loaded settings for {} guilds from {}",
            db.configs.len(),
            current_path.display()
        );
        return Ok((db, DocumentSource::Current));
    }

    if let Some(text) = read_if_exists(legacy_path).await? {
        let db = parse_document(&text)?;
        JsonFileSink::new(current_path).write(&db).await?;
        tracing::info!(
            "Migrated legacy settings for {} guilds from {} to {}",
            db.configs.len(),
            legacy_path.display(),
            current_path.display()
        );
        return Ok((db, DocumentSource::Legacy));
    }

    tracing::info!("No settings document found, starting with empty settings");
    Ok((Db::default(), DocumentSource::Fresh))
}
