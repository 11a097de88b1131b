use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    data::{
        document::{load_or_migrate, DocumentSource, JsonFileSink},
        store::SettingsStore,
        writer::SnapshotWriter,
    },
    error::AppError,
    state::AppState,
};

/// Installs the global tracing subscriber.
///
/// Log levels come from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads the settings document and starts the snapshot writer.
///
/// Loads `LevelUp.json` from the data directory, falling back to migrating the
/// legacy `settings.json`. When neither exists the bot starts with empty settings.
/// The legacy document is only ever read.
///
/// # Arguments
/// - `config` - Application configuration containing the data directory
///
/// # Returns
/// - `Ok(AppState)` - Settings loaded and writer running
/// - `Err(AppError::MigrationErr)` - A settings document could not be migrated
/// - `Err(AppError::IoErr)` - Data directory or settings files could not be accessed
pub async fn build_state(config: &Config) -> Result<AppState, AppError> {
    tokio::fs::create_dir_all(&config.data_dir).await?;

    let settings_path = config.settings_path();
    let (db, source) = load_or_migrate(&settings_path, &config.legacy_settings_path()).await?;
    if source == DocumentSource::Fresh {
        tracing::info!(
            "No settings found in {}, starting fresh",
            config.data_dir.display()
        );
    }

    let store = Arc::new(SettingsStore::new(db));
    let writer = SnapshotWriter::spawn(store.clone(), Arc::new(JsonFileSink::new(settings_path)));

    Ok(AppState::new(
        store,
        Arc::new(writer),
        config.command_prefixes.clone(),
    ))
}
