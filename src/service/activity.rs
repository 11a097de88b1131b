//! Activity orchestration.
//!
//! Runs the full flow for one member: eligibility, award, level update, then
//! role reconciliation and the level-up notice. Guild settings are locked only
//! while the profile is read and updated; role edits and notices happen after
//! the lock is released.

use rand::Rng;
use std::collections::BTreeSet;

use crate::{
    data::{cooldown::CooldownTracker, store::SettingsStore},
    error::{config::ConfigError, external::ExternalFailure, prestige::PrestigeError},
    model::{
        activity::{LevelChange, LevelTransition, MessageEvent, VoiceTick, XpAward},
        notification::{LevelUpNotice, NoticeContext},
        profile::Profile,
        role::{MemberRoleState, RoleConfig, RoleDiff, RoleHierarchy},
        settings::{GuildSettings, PrestigeTier},
    },
    service::{
        level::{
            apply_award, evaluate_message_event, evaluate_voice_tick, message_eligibility,
            set_level, voice_eligibility,
        },
        notification::{build_notice, Notifier},
        prestige::{PrestigeManager, Promotion},
        role_sync::{member_role_state, reconcile_roles, RoleMutator, RoleSyncService},
    },
};

/// What the host knows about the member at the time of the event.
#[derive(Debug, Clone, Default)]
pub struct MemberContext {
    pub current_roles: BTreeSet<u64>,
    pub hierarchy: RoleHierarchy,
    pub notice: NoticeContext,
}

/// Everything that happened while handling one activity or override.
#[derive(Debug, Default)]
pub struct ActivityOutcome {
    pub award: Option<XpAward>,
    pub change: Option<LevelChange>,
    /// Role diff applied, if roles were reconciled.
    pub roles: Option<RoleDiff>,
    /// Notice sent, or attempted when its delivery is in `failures`.
    pub notice: Option<LevelUpNotice>,
    pub failures: Vec<ExternalFailure>,
}

/// Work left once the guild lock is released.
struct FollowUp {
    guild_id: u64,
    state: MemberRoleState,
    config: RoleConfig,
    role_notice: Option<LevelUpNotice>,
    level_notice: Option<LevelUpNotice>,
}

impl FollowUp {
    fn plan(
        settings: &GuildSettings,
        guild_id: u64,
        member_id: u64,
        member: &MemberContext,
        transition: Option<LevelTransition>,
    ) -> Self {
        let state = member_role_state(settings, member_id, member.current_roles.clone());
        let config = settings.role_config();

        let (role_notice, level_notice) = match transition {
            Some(transition) => {
                let diff = reconcile_roles(&state, &config, &member.hierarchy);
                let granted = config
                    .level_roles
                    .get(&transition.new_level())
                    .copied()
                    .filter(|role_id| diff.added.contains(role_id));
                (
                    granted.and_then(|role_id| {
                        build_notice(settings, guild_id, &member.notice, &transition, Some(role_id))
                    }),
                    build_notice(settings, guild_id, &member.notice, &transition, None),
                )
            }
            None => (None, None),
        };

        Self {
            guild_id,
            state,
            config,
            role_notice,
            level_notice,
        }
    }
}

pub struct ActivityService<'a> {
    store: &'a SettingsStore,
    mutator: &'a dyn RoleMutator,
    notifier: &'a dyn Notifier,
}

impl<'a> ActivityService<'a> {
    pub fn new(
        store: &'a SettingsStore,
        mutator: &'a dyn RoleMutator,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            store,
            mutator,
            notifier,
        }
    }

    /// Handles a message sent by a guild member.
    ///
    /// The cooldown is only claimed once every other eligibility check passed,
    /// so ignored or short messages do not start a cooldown.
    ///
    /// # Arguments
    /// - `event` - The message event
    /// - `cooldowns` - Per-member cooldown tracker
    /// - `member` - Member roles, hierarchy and notice names
    /// - `rng` - Random source for the award
    ///
    /// # Returns
    /// - `Ok(ActivityOutcome)` - Outcome, with `award` unset if the message was rejected
    /// - `Err(ConfigError)` - Guild algorithm is misconfigured, nothing was changed
    pub async fn handle_message<R: Rng + Send + ?Sized>(
        &self,
        event: &MessageEvent,
        cooldowns: &CooldownTracker,
        member: &MemberContext,
        rng: &mut R,
    ) -> Result<ActivityOutcome, ConfigError> {
        let guild = self.store.guild(event.guild_id).await;
        let mut settings = guild.lock().await;

        let mut eligibility = message_eligibility(&settings, event, true);
        if eligibility.is_accepted() {
            settings.algorithm.validate()?;
            eligibility.cooling_down = !cooldowns
                .try_acquire(event.guild_id, event.member_id, event.timestamp, settings.cooldown)
                .await;
        }

        let Some(award) = evaluate_message_event(&settings, event, eligibility, rng)? else {
            return Ok(ActivityOutcome::default());
        };

        let (change, follow_up) = apply_locked(&mut settings, event.guild_id, event.member_id, award, member)?;
        drop(settings);

        Ok(self.finish(award, change, follow_up, member).await)
    }

    /// Handles claimed voice minutes.
    ///
    /// # Returns
    /// - `Ok(ActivityOutcome)` - Outcome, with `award` unset if the tick was rejected
    /// - `Err(ConfigError)` - Guild algorithm is misconfigured, nothing was changed
    pub async fn handle_voice_tick<R: Rng + Send + ?Sized>(
        &self,
        tick: &VoiceTick,
        member: &MemberContext,
        rng: &mut R,
    ) -> Result<ActivityOutcome, ConfigError> {
        let guild = self.store.guild(tick.guild_id).await;
        let mut settings = guild.lock().await;

        let eligibility = voice_eligibility(&settings, tick);
        let Some(award) = evaluate_voice_tick(&settings, tick, eligibility, rng)? else {
            return Ok(ActivityOutcome::default());
        };

        let (change, follow_up) = apply_locked(&mut settings, tick.guild_id, tick.member_id, award, member)?;
        drop(settings);

        Ok(self.finish(award, change, follow_up, member).await)
    }

    /// Administrative XP grant or removal.
    pub async fn adjust_xp(
        &self,
        guild_id: u64,
        member_id: u64,
        award: XpAward,
        member: &MemberContext,
    ) -> Result<ActivityOutcome, ConfigError> {
        let guild = self.store.guild(guild_id).await;
        let mut settings = guild.lock().await;

        let (change, follow_up) = apply_locked(&mut settings, guild_id, member_id, award, member)?;
        drop(settings);

        Ok(self.finish(award, change, follow_up, member).await)
    }

    /// Administrative override of a member's level.
    pub async fn set_level(
        &self,
        guild_id: u64,
        member_id: u64,
        level: u64,
        member: &MemberContext,
    ) -> ActivityOutcome {
        let guild = self.store.guild(guild_id).await;
        let mut settings = guild.lock().await;

        let algorithm = settings.algorithm;
        let change = set_level(settings.profile_mut(member_id), level, &algorithm);
        let follow_up = FollowUp::plan(&settings, guild_id, member_id, member, change.transition);
        drop(settings);

        let mut outcome = ActivityOutcome {
            change: Some(change),
            ..Default::default()
        };
        self.run_follow_up(follow_up, member, &mut outcome).await;
        outcome
    }

    /// Promotes a member to the next prestige tier and updates their roles.
    ///
    /// # Returns
    /// - `Ok((Promotion, ActivityOutcome))` - Member promoted
    /// - `Err(PrestigeError)` - Promotion precondition failed, nothing changed
    pub async fn promote(
        &self,
        guild_id: u64,
        member_id: u64,
        member: &MemberContext,
    ) -> Result<(Promotion, ActivityOutcome), PrestigeError> {
        self.change_prestige(guild_id, member_id, member, |profile, tiers| {
            PrestigeManager::promote(profile, tiers)
        })
        .await
    }

    /// Administrative override of a member's prestige.
    pub async fn set_prestige(
        &self,
        guild_id: u64,
        member_id: u64,
        prestige: u64,
        member: &MemberContext,
    ) -> Result<(Promotion, ActivityOutcome), PrestigeError> {
        self.change_prestige(guild_id, member_id, member, |profile, tiers| {
            PrestigeManager::set_prestige(profile, prestige, tiers)
        })
        .await
    }

    async fn change_prestige(
        &self,
        guild_id: u64,
        member_id: u64,
        member: &MemberContext,
        change: impl FnOnce(&mut Profile, &[PrestigeTier]) -> Result<Promotion, PrestigeError>,
    ) -> Result<(Promotion, ActivityOutcome), PrestigeError> {
        let guild = self.store.guild(guild_id).await;
        let mut settings = guild.lock().await;

        let tiers = settings.prestige_tiers.clone();
        let mut profile = settings.profile(member_id).cloned().unwrap_or_default();
        let promotion = change(&mut profile, &tiers)?;
        *settings.profile_mut(member_id) = profile;

        let follow_up = FollowUp::plan(&settings, guild_id, member_id, member, None);
        drop(settings);

        tracing::info!(
            "Member {} in guild {} moved from prestige {} to {}",
            member_id,
            guild_id,
            promotion.old_prestige,
            promotion.new_prestige
        );

        let mut outcome = ActivityOutcome::default();
        self.run_follow_up(follow_up, member, &mut outcome).await;
        Ok((promotion, outcome))
    }

    async fn finish(
        &self,
        award: XpAward,
        change: LevelChange,
        follow_up: Option<FollowUp>,
        member: &MemberContext,
    ) -> ActivityOutcome {
        let mut outcome = ActivityOutcome {
            award: Some(award),
            change: Some(change),
            ..Default::default()
        };
        if let Some(follow_up) = follow_up {
            self.run_follow_up(follow_up, member, &mut outcome).await;
        }
        outcome
    }

    async fn run_follow_up(
        &self,
        follow_up: FollowUp,
        member: &MemberContext,
        outcome: &mut ActivityOutcome,
    ) {
        let sync = RoleSyncService::new(self.mutator);
        let roles_applied = match sync
            .reconcile_member(
                follow_up.guild_id,
                &follow_up.state,
                &follow_up.config,
                &member.hierarchy,
            )
            .await
        {
            Ok(diff) => {
                outcome.roles = Some(diff);
                true
            }
            Err(e) => {
                tracing::error!(
                    "Failed to update level roles for member {} in guild {}: {:?}",
                    follow_up.state.member_id,
                    follow_up.guild_id,
                    e
                );
                outcome.failures.push(e);
                false
            }
        };

        let notice = if roles_applied {
            follow_up.role_notice.or(follow_up.level_notice)
        } else {
            follow_up.level_notice
        };

        if let Some(notice) = notice {
            if let Err(e) = self.notifier.send_notice(&notice).await {
                tracing::error!(
                    "Failed to send level-up notice to member {} in guild {}: {:?}",
                    notice.member_id,
                    notice.guild_id,
                    e
                );
                outcome.failures.push(e);
            }
            outcome.notice = Some(notice);
        }
    }
}

/// Applies an award under the guild lock and plans the follow-up work.
///
/// Follow-up is only planned when the level changed.
fn apply_locked(
    settings: &mut GuildSettings,
    guild_id: u64,
    member_id: u64,
    award: XpAward,
    member: &MemberContext,
) -> Result<(LevelChange, Option<FollowUp>), ConfigError> {
    let algorithm = settings.algorithm;
    algorithm.validate()?;
    let change = apply_award(settings.profile_mut(member_id), award, &algorithm)?;

    if let Some(transition) = change.transition {
        tracing::debug!(
            "Member {} in guild {} changed level: {:?}",
            member_id,
            guild_id,
            transition
        );
    }

    let follow_up = change
        .transition
        .map(|transition| FollowUp::plan(settings, guild_id, member_id, member, Some(transition)));

    Ok((change, follow_up))
}
