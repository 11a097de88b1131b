//! Activity events flowing into the level engine and the results flowing out.

use chrono::{DateTime, Utc};

/// Kind of activity an award was earned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Message,
    Voice,
}

/// A message sent by a guild member, reduced to what the engine needs.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub guild_id: u64,
    pub member_id: u64,
    pub channel_id: u64,
    /// Parent category of the channel, if any.
    pub category_id: Option<u64>,
    /// Roles the member currently holds.
    pub role_ids: Vec<u64>,
    /// Length of the message content in characters.
    pub content_length: usize,
    /// Whether the message invokes a bot command.
    pub is_command: bool,
    pub timestamp: DateTime<Utc>,
}

/// Identifies one voice tick so it is credited at most once.
///
/// `minute_mark` counts whole minutes since the session started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId {
    pub session_id: u64,
    pub minute_mark: u64,
}

/// Whole voice minutes claimed for a member since their last accounted tick.
#[derive(Debug, Clone)]
pub struct VoiceTick {
    pub id: TickId,
    pub guild_id: u64,
    pub member_id: u64,
    pub channel_id: u64,
    pub category_id: Option<u64>,
    pub role_ids: Vec<u64>,
    /// Newly elapsed whole minutes. Never overlaps an earlier tick.
    pub minutes: u64,
    pub streaming: bool,
    pub muted: bool,
    pub deafened: bool,
    pub invisible: bool,
    /// No other tracked member is in the channel.
    pub solo: bool,
}

/// Eligibility decisions made before an event reaches the level engine.
///
/// Each flag set to `true` is a reason to reject the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Eligibility {
    /// Leveling is disabled for the guild.
    pub disabled: bool,
    /// Member, one of their roles, the channel or its category is ignored.
    pub ignored: bool,
    /// Message is shorter than the configured minimum length.
    pub too_short: bool,
    /// Message is a command and command XP is off.
    pub command: bool,
    /// Member's message cooldown has not elapsed.
    pub cooling_down: bool,
    /// Member's voice state (muted, deafened, alone, invisible) is ignored.
    pub voice_state: bool,
}

impl Eligibility {
    /// Whether the event may earn XP.
    pub fn is_accepted(&self) -> bool {
        !(self.disabled
            || self.ignored
            || self.too_short
            || self.command
            || self.cooling_down
            || self.voice_state)
    }
}

/// Where an XP change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardSource {
    Message,
    Voice { minutes: u64 },
    /// Administrative grant (positive) or removal (negative).
    Admin,
}

/// A signed XP delta ready to be applied to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpAward {
    pub delta: i64,
    pub source: AwardSource,
}

impl XpAward {
    pub fn message(xp: u64) -> Self {
        Self {
            delta: clamp_delta(xp),
            source: AwardSource::Message,
        }
    }

    pub fn voice(xp: u64, minutes: u64) -> Self {
        Self {
            delta: clamp_delta(xp),
            source: AwardSource::Voice { minutes },
        }
    }

    pub fn admin_add(xp: u64) -> Self {
        Self {
            delta: clamp_delta(xp),
            source: AwardSource::Admin,
        }
    }

    pub fn admin_remove(xp: u64) -> Self {
        Self {
            delta: -clamp_delta(xp),
            source: AwardSource::Admin,
        }
    }
}

fn clamp_delta(xp: u64) -> i64 {
    i64::try_from(xp).unwrap_or(i64::MAX)
}

/// Direction of a level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTransition {
    Up { old_level: u64, new_level: u64 },
    Down { old_level: u64, new_level: u64 },
}

impl LevelTransition {
    pub fn new_level(&self) -> u64 {
        match self {
            LevelTransition::Up { new_level, .. } | LevelTransition::Down { new_level, .. } => {
                *new_level
            }
        }
    }

    pub fn is_level_up(&self) -> bool {
        matches!(self, LevelTransition::Up { .. })
    }
}

/// Outcome of applying an award to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub old_xp: u64,
    pub new_xp: u64,
    /// `None` when the level did not change.
    pub transition: Option<LevelTransition>,
}
