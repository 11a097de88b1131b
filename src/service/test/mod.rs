use crate::{
    error::{config::ConfigError, external::ExternalFailure, prestige::PrestigeError},
    model::{
        activity::{
            AwardSource, Eligibility, EventKind, LevelTransition, MessageEvent, TickId, VoiceTick,
            XpAward,
        },
        algorithm::Algorithm,
        notification::{LevelUpNotice, NoticeContext, NoticeTarget},
        profile::Profile,
        role::{MemberRoleState, RoleConfig, RoleDiff, RoleHierarchy},
        settings::{GuildSettings, PrestigeTier},
        xp_range::XpRange,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use std::{
    collections::{BTreeSet, HashMap},
    sync::Mutex,
};

mod bonus;
mod level;
mod role_sync;

const GUILD_ID: u64 = 1;
const MEMBER_ID: u64 = 42;

/// Enabled guild settings with the default curve and no bonuses.
fn enabled_settings() -> GuildSettings {
    GuildSettings {
        enabled: true,
        ..Default::default()
    }
}

fn message_event(role_ids: Vec<u64>, channel_id: u64) -> MessageEvent {
    MessageEvent {
        guild_id: GUILD_ID,
        member_id: MEMBER_ID,
        channel_id,
        category_id: None,
        role_ids,
        content_length: 20,
        is_command: false,
        timestamp: Utc::now(),
    }
}

fn voice_tick(minutes: u64) -> VoiceTick {
    VoiceTick {
        id: TickId {
            session_id: 1,
            minute_mark: minutes,
        },
        guild_id: GUILD_ID,
        member_id: MEMBER_ID,
        channel_id: 500,
        category_id: None,
        role_ids: Vec::new(),
        minutes,
        streaming: false,
        muted: false,
        deafened: false,
        invisible: false,
        solo: false,
    }
}

fn range(min: u64, max: u64) -> XpRange {
    XpRange::new(min, max).unwrap()
}

/// Hierarchy where every listed role sits below the bot.
fn open_hierarchy(role_ids: &[u64]) -> RoleHierarchy {
    let positions = role_ids.iter().map(|role_id| (*role_id, 1)).collect();
    RoleHierarchy::new(positions, Some(10))
}

/// Role mutator recording calls and rejecting chosen members.
#[derive(Default)]
struct RecordingMutator {
    failing_members: BTreeSet<u64>,
    calls: Mutex<Vec<(u64, RoleDiff)>>,
}

impl RecordingMutator {
    fn failing(members: &[u64]) -> Self {
        Self {
            failing_members: members.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<(u64, RoleDiff)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl crate::service::role_sync::RoleMutator for RecordingMutator {
    async fn apply_role_diff(
        &self,
        guild_id: u64,
        diff: &RoleDiff,
        _current: &BTreeSet<u64>,
    ) -> Result<(), ExternalFailure> {
        self.calls.lock().unwrap().push((guild_id, diff.clone()));
        if self.failing_members.contains(&diff.member_id) {
            return Err(ExternalFailure::RoleMutation {
                member_id: diff.member_id,
                reason: "Missing Permissions".to_string(),
            });
        }
        Ok(())
    }
}

/// Notifier recording every notice.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<LevelUpNotice>>,
}

#[async_trait]
impl crate::service::notification::Notifier for RecordingNotifier {
    async fn send_notice(&self, notice: &LevelUpNotice) -> Result<(), ExternalFailure> {
        self.sent.lock().unwrap().push(notice.clone());
        Ok(())
    }
}
