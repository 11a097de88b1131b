//! Error types for the levelup engine and bot.
//!
//! `AppError` is the top-level error returned by startup, persistence and the bot
//! adapter. It wraps domain-specific errors through `#[from]` conversions so `?`
//! works across layers. Engine components return the narrower domain errors
//! directly (`ConfigError`, `PrestigeError`), and per-member collaborator failures
//! (`ExternalFailure`) are collected into reports rather than returned.

pub mod config;
pub mod external;
pub mod prestige;

use thiserror::Error;

pub use migration::MigrationError;

use crate::error::{config::ConfigError, prestige::PrestigeError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid configuration, either from the environment or from guild settings.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Prestige promotion or override was not permitted.
    #[error(transparent)]
    PrestigeErr(#[from] PrestigeError),

    /// Settings document could not be migrated to the current schema.
    ///
    /// The document on disk is left untouched when this is returned.
    #[error(transparent)]
    MigrationErr(#[from] MigrationError),

    /// Filesystem error while reading or writing the settings document.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Settings document serialization error.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// The latest settings snapshot could not be written.
    ///
    /// The in-memory settings are intact; a later successful write clears this.
    #[error("Failed to write settings snapshot {generation}: {reason}")]
    SnapshotWriteErr { generation: u64, reason: String },

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// A background task stopped before finishing its work.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
