use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::TestError;

/// File name of the current settings document inside a data directory.
pub const SETTINGS_FILE: &str = "LevelUp.json";

/// File name of the legacy settings document inside a data directory.
pub const LEGACY_SETTINGS_FILE: &str = "settings.json";

static NEXT_DIR: AtomicU64 = AtomicU64::new(0);

/// Test context owning a scratch data directory.
///
/// The directory is unique per context and removed again when the context is
/// dropped, so tests running in parallel never observe each other's documents.
pub struct TestContext {
    dir: PathBuf,
}

impl TestContext {
    /// Creates a fresh, empty scratch directory under the system temp dir.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context owning the new directory
    /// - `Err(TestError::Io)` - Failed to create the directory
    pub fn new() -> Result<Self, TestError> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let dir = std::env::temp_dir().join(format!(
            "levelup-test-{}-{}-{}",
            std::process::id(),
            nanos,
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    /// Scratch data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the current settings document.
    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Path of the legacy settings document.
    pub fn legacy_path(&self) -> PathBuf {
        self.dir.join(LEGACY_SETTINGS_FILE)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
