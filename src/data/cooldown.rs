//! Message cooldowns per guild member.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::data::guild_map::GuildMap;

/// Last XP-earning message time of every member, per guild.
///
/// Cooldowns are in-memory only and start fresh after a restart.
#[derive(Default)]
pub struct CooldownTracker {
    guilds: GuildMap<HashMap<u64, DateTime<Utc>>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the member's cooldown if it has elapsed.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the message was sent in
    /// - `member_id` - Message author
    /// - `now` - Message time
    /// - `cooldown_seconds` - Guild cooldown
    ///
    /// # Returns
    /// - `true` - Cooldown elapsed, `now` recorded as the new last award time
    /// - `false` - Still cooling down, nothing recorded
    pub async fn try_acquire(
        &self,
        guild_id: u64,
        member_id: u64,
        now: DateTime<Utc>,
        cooldown_seconds: u64,
    ) -> bool {
        let guild = self.guilds.entry(guild_id).await;
        let mut last_awarded = guild.lock().await;

        let cooldown = i64::try_from(cooldown_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        let ready = match last_awarded.get(&member_id) {
            Some(last) => now.signed_duration_since(*last) >= cooldown,
            None => true,
        };

        if ready {
            last_awarded.insert(member_id, now);
        }
        ready
    }

    /// Forgets every cooldown in a guild.
    pub async fn clear_guild(&self, guild_id: u64) {
        self.guilds.remove(guild_id).await;
    }
}
