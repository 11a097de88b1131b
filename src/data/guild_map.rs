//! Per-guild locking.
//!
//! The outer `RwLock` is only held long enough to look up or insert a guild's
//! entry. Work on a guild locks that guild's own `Mutex`, so activity in one
//! guild never waits on another.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};

pub struct GuildMap<T> {
    guilds: RwLock<HashMap<u64, Arc<Mutex<T>>>>,
}

impl<T> Default for GuildMap<T> {
    fn default() -> Self {
        Self {
            guilds: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> GuildMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from existing values.
    pub fn from_entries(entries: impl IntoIterator<Item = (u64, T)>) -> Self {
        let guilds = entries
            .into_iter()
            .map(|(guild_id, value)| (guild_id, Arc::new(Mutex::new(value))))
            .collect();
        Self {
            guilds: RwLock::new(guilds),
        }
    }

    /// Returns the guild's entry if it exists.
    pub async fn get(&self, guild_id: u64) -> Option<Arc<Mutex<T>>> {
        self.guilds.read().await.get(&guild_id).cloned()
    }

    /// Returns the guild's entry, creating it with `init` on first reference.
    pub async fn get_or_insert_with(&self, guild_id: u64, init: impl FnOnce() -> T) -> Arc<Mutex<T>> {
        if let Some(entry) = self.get(guild_id).await {
            return entry;
        }

        self.guilds
            .write()
            .await
            .entry(guild_id)
            .or_insert_with(|| Arc::new(Mutex::new(init())))
            .clone()
    }

    /// Removes a guild's entry.
    ///
    /// Holders of the returned handle can finish their work; later lookups create
    /// a fresh entry.
    pub async fn remove(&self, guild_id: u64) -> Option<Arc<Mutex<T>>> {
        self.guilds.write().await.remove(&guild_id)
    }

    /// Snapshot of every guild id and entry handle.
    pub async fn entries(&self) -> Vec<(u64, Arc<Mutex<T>>)> {
        self.guilds
            .read()
            .await
            .iter()
            .map(|(guild_id, entry)| (*guild_id, entry.clone()))
            .collect()
    }

    /// Replaces every entry.
    pub async fn replace_all(&self, entries: impl IntoIterator<Item = (u64, T)>) {
        let guilds = entries
            .into_iter()
            .map(|(guild_id, value)| (guild_id, Arc::new(Mutex::new(value))))
            .collect();
        *self.guilds.write().await = guilds;
    }
}

impl<T: Default> GuildMap<T> {
    /// Returns the guild's entry, creating a default one on first reference.
    pub async fn entry(&self, guild_id: u64) -> Arc<Mutex<T>> {
        self.get_or_insert_with(guild_id, T::default).await
    }
}
