use tokio::sync::{Mutex, RwLock};
use std::sync::Arc;

use crate::{
    data::guild_map::GuildMap,
    model::{
        db::{Db, GlobalSettings},
        settings::GuildSettings,
    },
};

/// In-memory settings store, the canonical state of every guild.
///
/// The on-disk document is only a snapshot of this store. Each guild's settings
/// sit behind their own lock so unrelated guilds never serialize.
pub struct SettingsStore {
    guilds: GuildMap<GuildSettings>,
    global: RwLock<GlobalSettings>,
}

impl SettingsStore {
    /// Creates a store holding the contents of a settings document.
    pub fn new(db: Db) -> Self {
        Self {
            guilds: GuildMap::from_entries(db.configs),
            global: RwLock::new(db.global),
        }
    }

    /// Returns a guild's settings, creating defaults for an unknown guild.
    pub async fn guild(&self, guild_id: u64) -> Arc<Mutex<GuildSettings>> {
        self.guilds.entry(guild_id).await
    }

    /// Returns a guild's settings only if the guild is known.
    pub async fn existing_guild(&self, guild_id: u64) -> Option<Arc<Mutex<GuildSettings>>> {
        self.guilds.get(guild_id).await
    }

    /// Deletes a guild's settings and every profile in it.
    pub async fn remove_guild(&self, guild_id: u64) -> bool {
        self.guilds.remove(guild_id).await.is_some()
    }

    /// Ids of every known guild.
    pub async fn guild_ids(&self) -> Vec<u64> {
        self.guilds
            .entries()
            .await
            .into_iter()
            .map(|(guild_id, _)| guild_id)
            .collect()
    }

    pub async fn global(&self) -> GlobalSettings {
        self.global.read().await.clone()
    }

    pub async fn set_global(&self, global: GlobalSettings) {
        *self.global.write().await = global;
    }

    /// Copies the whole store into a settings document.
    ///
    /// Each guild is copied under its own lock, so every guild in the snapshot
    /// is internally consistent.
    pub async fn snapshot(&self) -> Db {
        let mut db = Db {
            global: self.global().await,
            ..Db::default()
        };

        for (guild_id, settings) in self.guilds.entries().await {
            let settings = settings.lock().await.clone();
            db.configs.insert(guild_id, settings);
        }

        db
    }

    /// Replaces the store's contents with a settings document.
    pub async fn restore(&self, db: Db) {
        self.guilds.replace_all(db.configs).await;
        self.set_global(db.global).await;
    }
}
