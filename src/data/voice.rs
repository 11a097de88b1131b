//! Voice session tracking.
//!
//! Each member in a voice channel has a session with an id, a join time and the
//! number of whole minutes already credited. A tick is identified by
//! `(session_id, minute_mark)` where the mark counts whole minutes since join;
//! claiming a tick credits only the minutes between the last credited mark and
//! the new one, so replays and overlapping ticks credit nothing.

use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    data::guild_map::GuildMap,
    model::activity::{TickId, VoiceTick},
};

/// A member's voice channel and state as reported by Discord.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceStatus {
    pub channel_id: u64,
    pub category_id: Option<u64>,
    pub role_ids: Vec<u64>,
    pub muted: bool,
    pub deafened: bool,
    pub streaming: bool,
    pub invisible: bool,
}

#[derive(Debug, Clone)]
struct VoiceSession {
    session_id: u64,
    joined_at: DateTime<Utc>,
    credited_minutes: u64,
    status: VoiceStatus,
}

impl VoiceSession {
    fn minute_mark(&self, now: DateTime<Utc>) -> u64 {
        let seconds = now.signed_duration_since(self.joined_at).num_seconds();
        u64::try_from(seconds / 60).unwrap_or(0)
    }
}

type GuildSessions = HashMap<u64, VoiceSession>;

#[derive(Default)]
pub struct VoiceTracker {
    guilds: GuildMap<GuildSessions>,
    next_session: AtomicU64,
}

/// Whether no other tracked member shares the member's channel.
fn is_solo(sessions: &GuildSessions, member_id: u64, channel_id: u64) -> bool {
    !sessions
        .iter()
        .any(|(other, session)| *other != member_id && session.status.channel_id == channel_id)
}

/// Credits the minutes between the last credited mark and `minute_mark`.
fn claim(
    sessions: &mut GuildSessions,
    guild_id: u64,
    member_id: u64,
    id: TickId,
) -> Option<VoiceTick> {
    let solo = sessions
        .get(&member_id)
        .map(|session| is_solo(sessions, member_id, session.status.channel_id))?;

    let session = sessions.get_mut(&member_id)?;
    if session.session_id != id.session_id || id.minute_mark <= session.credited_minutes {
        return None;
    }

    let minutes = id.minute_mark - session.credited_minutes;
    session.credited_minutes = id.minute_mark;
    let status = &session.status;

    Some(VoiceTick {
        id,
        guild_id,
        member_id,
        channel_id: status.channel_id,
        category_id: status.category_id,
        role_ids: status.role_ids.clone(),
        minutes,
        streaming: status.streaming,
        muted: status.muted,
        deafened: status.deafened,
        invisible: status.invisible,
        solo,
    })
}

impl VoiceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a voice state change.
    ///
    /// Staying in the same channel keeps the session and only updates the state.
    /// Leaving or moving claims the old session's remaining whole minutes and
    /// closes it; moving then opens a new session.
    ///
    /// # Arguments
    /// - `guild_id` - Guild of the voice state
    /// - `member_id` - Member whose state changed
    /// - `status` - New state, `None` when the member left voice
    /// - `now` - Time of the change
    ///
    /// # Returns
    /// - `Some(VoiceTick)` - Minutes credited from a closed session
    /// - `None` - Nothing to credit
    pub async fn update(
        &self,
        guild_id: u64,
        member_id: u64,
        status: Option<VoiceStatus>,
        now: DateTime<Utc>,
    ) -> Option<VoiceTick> {
        let guild = self.guilds.entry(guild_id).await;
        let mut sessions = guild.lock().await;

        let same_channel = match (sessions.get(&member_id), &status) {
            (Some(session), Some(status)) => session.status.channel_id == status.channel_id,
            _ => false,
        };
        if same_channel {
            if let (Some(session), Some(status)) = (sessions.get_mut(&member_id), status) {
                session.status = status;
            }
            return None;
        }

        let final_id = sessions.get(&member_id).map(|session| TickId {
            session_id: session.session_id,
            minute_mark: session.minute_mark(now),
        });
        let final_tick = final_id.and_then(|id| claim(&mut sessions, guild_id, member_id, id));
        sessions.remove(&member_id);

        if let Some(status) = status {
            let session_id = self.next_session.fetch_add(1, Ordering::Relaxed) + 1;
            sessions.insert(
                member_id,
                VoiceSession {
                    session_id,
                    joined_at: now,
                    credited_minutes: 0,
                    status,
                },
            );
        }

        final_tick
    }

    /// The tick id a member's session would claim at `now`.
    pub async fn tick_id(&self, guild_id: u64, member_id: u64, now: DateTime<Utc>) -> Option<TickId> {
        let guild = self.guilds.get(guild_id).await?;
        let sessions = guild.lock().await;
        sessions.get(&member_id).map(|session| TickId {
            session_id: session.session_id,
            minute_mark: session.minute_mark(now),
        })
    }

    /// Claims one tick. Replaying a tick or claiming an older one credits nothing.
    pub async fn claim_tick(&self, guild_id: u64, member_id: u64, id: TickId) -> Option<VoiceTick> {
        let guild = self.guilds.get(guild_id).await?;
        let mut sessions = guild.lock().await;
        claim(&mut sessions, guild_id, member_id, id)
    }

    /// Claims the newly elapsed minutes of every session in every guild.
    pub async fn tick_all(&self, now: DateTime<Utc>) -> Vec<VoiceTick> {
        let mut ticks = Vec::new();

        for (guild_id, guild) in self.guilds.entries().await {
            let mut sessions = guild.lock().await;
            let ids: Vec<(u64, TickId)> = sessions
                .iter()
                .map(|(member_id, session)| {
                    (
                        *member_id,
                        TickId {
                            session_id: session.session_id,
                            minute_mark: session.minute_mark(now),
                        },
                    )
                })
                .collect();

            ticks.extend(
                ids.into_iter()
                    .filter_map(|(member_id, id)| claim(&mut sessions, guild_id, member_id, id)),
            );
        }

        ticks
    }

    /// Forgets every session in a guild without crediting them.
    pub async fn clear_guild(&self, guild_id: u64) {
        self.guilds.remove(guild_id).await;
    }
}
