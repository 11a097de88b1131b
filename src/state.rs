use std::sync::Arc;

use crate::data::{
    cooldown::CooldownTracker, store::SettingsStore, voice::VoiceTracker, writer::SnapshotWriter,
};

/// Shared state handed to the bot handler and the scheduler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SettingsStore>,
    pub writer: Arc<SnapshotWriter>,
    pub cooldowns: Arc<CooldownTracker>,
    pub voice: Arc<VoiceTracker>,
    /// Prefixes marking a message as a bot command.
    pub command_prefixes: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(
        store: Arc<SettingsStore>,
        writer: Arc<SnapshotWriter>,
        command_prefixes: Vec<String>,
    ) -> Self {
        Self {
            store,
            writer,
            cooldowns: Arc::new(CooldownTracker::new()),
            voice: Arc::new(VoiceTracker::new()),
            command_prefixes: Arc::new(command_prefixes),
        }
    }

    /// Whether the message content invokes a bot command.
    pub fn is_command(&self, content: &str) -> bool {
        self.command_prefixes
            .iter()
            .any(|prefix| content.starts_with(prefix.as_str()))
    }

    /// Drops cooldowns and voice sessions of a guild the bot left.
    ///
    /// Settings and profiles are kept in case the bot is added back.
    pub async fn clear_guild_activity(&self, guild_id: u64) {
        self.cooldowns.clear_guild(guild_id).await;
        self.voice.clear_guild(guild_id).await;
    }
}
