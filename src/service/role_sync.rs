//! Role reconciliation.
//!
//! `reconcile_roles` plans which level and prestige roles a member should gain or
//! lose. `RoleSyncService` applies plans through a `RoleMutator`, one batched
//! edit per member, and isolates failures so a rejected member never stops the
//! rest of a roster pass.

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::{
    error::external::ExternalFailure,
    model::{
        role::{MemberRoleState, RoleConfig, RoleDiff, RoleHierarchy, RosterReport},
        settings::GuildSettings,
    },
};

/// Applies role changes for one member in a single call.
#[async_trait]
pub trait RoleMutator: Send + Sync {
    /// Adds `diff.added` and removes `diff.removed` in one role-membership edit.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the member belongs to
    /// - `diff` - Planned changes
    /// - `current` - Roles the member held when the plan was made
    async fn apply_role_diff(
        &self,
        guild_id: u64,
        diff: &RoleDiff,
        current: &BTreeSet<u64>,
    ) -> Result<(), ExternalFailure>;
}

/// Builds a member's role state from their profile.
///
/// Members without a profile are treated as level 0 with no prestige.
pub fn member_role_state(
    settings: &GuildSettings,
    member_id: u64,
    current_roles: BTreeSet<u64>,
) -> MemberRoleState {
    let (level, prestige) = settings
        .profile(member_id)
        .map(|profile| (profile.level, profile.prestige))
        .unwrap_or((0, 0));

    MemberRoleState {
        member_id,
        level,
        prestige,
        current_roles,
    }
}

/// Roles a member should hold for their level and prestige.
fn desired_roles(state: &MemberRoleState, config: &RoleConfig) -> BTreeSet<u64> {
    let mut earned = config.level_roles.range(..=state.level);

    let mut desired: BTreeSet<u64> = if config.autoremove {
        earned.next_back().map(|(_, role)| *role).into_iter().collect()
    } else {
        earned.map(|(_, role)| *role).collect()
    };

    for (index, role) in config.prestige_tiers.iter().enumerate() {
        let tier = index as u64 + 1;
        let holds = if config.stack_prestige_roles {
            tier <= state.prestige
        } else {
            tier == state.prestige
        };
        if holds {
            desired.insert(*role);
        }
    }

    desired
}

/// Plans the role changes for one member.
///
/// Roles the member should gain but the bot cannot manage are reported as
/// skipped. Only roles configured as level or prestige roles are ever removed.
///
/// # Arguments
/// - `state` - Member's level, prestige and current roles
/// - `config` - Guild role configuration
/// - `hierarchy` - Guild role positions and the bot's ceiling
///
/// # Returns
/// - `RoleDiff` - Roles to add, remove and skip
pub fn reconcile_roles(
    state: &MemberRoleState,
    config: &RoleConfig,
    hierarchy: &RoleHierarchy,
) -> RoleDiff {
    let desired = desired_roles(state, config);

    let (added, skipped): (BTreeSet<u64>, BTreeSet<u64>) = desired
        .difference(&state.current_roles)
        .copied()
        .partition(|role_id| hierarchy.can_manage(*role_id));

    let removed = state
        .current_roles
        .intersection(&config.managed_roles())
        .filter(|role_id| !desired.contains(role_id))
        .copied()
        .collect();

    RoleDiff {
        member_id: state.member_id,
        added,
        removed,
        skipped,
    }
}

pub struct RoleSyncService<'a, M: RoleMutator + ?Sized> {
    mutator: &'a M,
}

impl<'a, M: RoleMutator + ?Sized> RoleSyncService<'a, M> {
    pub fn new(mutator: &'a M) -> Self {
        Self { mutator }
    }

    /// Plans and applies role changes for one member.
    ///
    /// # Returns
    /// - `Ok(RoleDiff)` - Diff that was applied (no call is made for an empty diff)
    /// - `Err(ExternalFailure)` - The mutation was rejected
    pub async fn reconcile_member(
        &self,
        guild_id: u64,
        state: &MemberRoleState,
        config: &RoleConfig,
        hierarchy: &RoleHierarchy,
    ) -> Result<RoleDiff, ExternalFailure> {
        let diff = reconcile_roles(state, config, hierarchy);

        if !diff.skipped.is_empty() {
            tracing::warn!(
                "Skipping roles {:?} for member {} in guild {}: above the bot's highest role",
                diff.skipped,
                state.member_id,
                guild_id
            );
        }

        if diff.is_empty() {
            return Ok(diff);
        }

        self.mutator
            .apply_role_diff(guild_id, &diff, &state.current_roles)
            .await?;

        tracing::debug!(
            "Updated roles for member {} in guild {}: +{:?} -{:?}",
            state.member_id,
            guild_id,
            diff.added,
            diff.removed
        );

        Ok(diff)
    }

    /// Reconciles every member of a guild.
    ///
    /// Each member is planned and mutated independently. Failures are collected
    /// into the report and never stop the pass.
    ///
    /// # Arguments
    /// - `guild_id` - Guild being reconciled
    /// - `members` - Role state of every member to check
    /// - `config` - Guild role configuration
    /// - `hierarchy` - Guild role positions and the bot's ceiling
    ///
    /// # Returns
    /// - `RosterReport` - Counts of changes plus per-member failures
    pub async fn reconcile_roster(
        &self,
        guild_id: u64,
        members: &[MemberRoleState],
        config: &RoleConfig,
        hierarchy: &RoleHierarchy,
    ) -> RosterReport {
        let mut report = RosterReport::default();

        for state in members {
            report.processed += 1;

            match self
                .reconcile_member(guild_id, state, config, hierarchy)
                .await
            {
                Ok(diff) => {
                    report.roles_skipped += diff.skipped.len();
                    if !diff.is_empty() {
                        report.changed += 1;
                        report.roles_added += diff.added.len();
                        report.roles_removed += diff.removed.len();
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to reconcile roles for member {} in guild {}: {:?}",
                        state.member_id,
                        guild_id,
                        e
                    );
                    report.failures.push(e);
                }
            }
        }

        tracing::info!(
            "Reconciled {} members in guild {}: {} changed, {} failed",
            report.processed,
            guild_id,
            report.changed,
            report.failures.len()
        );

        report
    }
}
