//! Per-guild settings aggregate.
//!
//! A `GuildSettings` owns every configurable knob of the leveling system for one
//! guild plus the profiles of its members. Settings are created with defaults the
//! first time a guild is referenced and profiles the first time a member earns XP.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{
    activity::EventKind, algorithm::Algorithm, emoji::Emoji, emoji::Emojis, profile::Profile,
    role::RoleConfig, xp_range::XpRange,
};

/// Bonus ranges keyed by role or channel id, split by activity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusRules {
    /// Bonuses applied to message XP.
    pub msg: BTreeMap<u64, XpRange>,
    /// Bonuses applied to voice XP (per minute).
    pub voice: BTreeMap<u64, XpRange>,
}

impl BonusRules {
    /// Bonus map for an activity kind.
    pub fn for_kind(&self, kind: EventKind) -> &BTreeMap<u64, XpRange> {
        match kind {
            EventKind::Message => &self.msg,
            EventKind::Voice => &self.voice,
        }
    }
}

/// One prestige tier. Tier `n` (1-based position in the list) is prestige `n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrestigeTier {
    /// Level a member must reach to be promoted into this tier.
    pub activation_level: u64,
    /// Role granted for this tier.
    pub role: u64,
    #[serde(default)]
    pub emoji: Option<Emoji>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildSettings {
    /// Whether the leveling system is active in this guild.
    pub enabled: bool,

    // Progression
    pub algorithm: Algorithm,
    /// Base message award range.
    pub xp: XpRange,
    /// XP per whole minute spent in voice.
    pub voice_xp: u64,
    /// Seconds a member must wait between XP-earning messages.
    pub cooldown: u64,
    /// Minimum message length in characters, 0 to disable.
    pub min_length: usize,
    /// Whether command messages earn XP.
    pub command_xp: bool,

    // Ignore lists
    pub ignored_channels: BTreeSet<u64>,
    pub ignored_roles: BTreeSet<u64>,
    pub ignored_users: BTreeSet<u64>,

    // Voice toggles
    pub ignore_muted: bool,
    pub ignore_solo: bool,
    pub ignore_deafened: bool,
    pub ignore_invisible: bool,

    // Bonuses
    pub role_bonus: BonusRules,
    pub channel_bonus: BonusRules,
    /// Extra voice XP per minute while streaming. `None` disables it.
    pub stream_bonus: Option<XpRange>,

    // Roles
    /// Level -> role granted at that level.
    pub level_roles: BTreeMap<u64, u64>,
    pub prestige_tiers: Vec<PrestigeTier>,
    pub stack_prestige_roles: bool,
    /// Keep only the most recent level role instead of every earned one.
    pub autoremove: bool,

    // Notifications
    pub notify: bool,
    pub notify_dm: bool,
    pub notify_mention: bool,
    pub notify_channel: Option<u64>,
    pub levelup_msg: Option<String>,
    pub levelup_dm: Option<String>,
    pub role_awarded_msg: Option<String>,
    pub role_awarded_dm: Option<String>,

    pub emojis: Emojis,

    /// Member id -> profile.
    pub users: BTreeMap<u64, Profile>,
}

impl Default for GuildSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            algorithm: Algorithm::default(),
            xp: XpRange::DEFAULT_MESSAGE,
            voice_xp: 2,
            cooldown: 60,
            min_length: 0,
            command_xp: false,
            ignored_channels: BTreeSet::new(),
            ignored_roles: BTreeSet::new(),
            ignored_users: BTreeSet::new(),
            ignore_muted: false,
            ignore_solo: false,
            ignore_deafened: false,
            ignore_invisible: false,
            role_bonus: BonusRules::default(),
            channel_bonus: BonusRules::default(),
            stream_bonus: None,
            level_roles: BTreeMap::new(),
            prestige_tiers: Vec::new(),
            stack_prestige_roles: false,
            autoremove: false,
            notify: false,
            notify_dm: false,
            notify_mention: false,
            notify_channel: None,
            levelup_msg: None,
            levelup_dm: None,
            role_awarded_msg: None,
            role_awarded_dm: None,
            emojis: Emojis::default(),
            users: BTreeMap::new(),
        }
    }
}

impl GuildSettings {
    /// Returns a member's profile, creating an empty one on first reference.
    pub fn profile_mut(&mut self, member_id: u64) -> &mut Profile {
        self.users.entry(member_id).or_default()
    }

    /// Returns a member's profile if they have earned XP before.
    pub fn profile(&self, member_id: u64) -> Option<&Profile> {
        self.users.get(&member_id)
    }

    /// Extracts the role configuration needed to reconcile member roles.
    ///
    /// The copy lets reconciliation run without holding the guild lock.
    pub fn role_config(&self) -> RoleConfig {
        RoleConfig {
            level_roles: self.level_roles.clone(),
            prestige_tiers: self.prestige_tiers.iter().map(|tier| tier.role).collect(),
            stack_prestige_roles: self.stack_prestige_roles,
            autoremove: self.autoremove,
        }
    }
}
