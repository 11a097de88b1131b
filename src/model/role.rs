//! Role reconciliation inputs and outputs.

use serenity::all::Role;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::external::ExternalFailure;

/// The parts of guild settings that decide which roles a member should hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleConfig {
    /// Level -> role granted at that level.
    pub level_roles: BTreeMap<u64, u64>,
    /// Role for each prestige tier. Index 0 is prestige 1.
    pub prestige_tiers: Vec<u64>,
    pub stack_prestige_roles: bool,
    pub autoremove: bool,
}

impl RoleConfig {
    /// Every role the reconciler manages. Roles outside this set are never removed.
    pub fn managed_roles(&self) -> BTreeSet<u64> {
        self.level_roles
            .values()
            .chain(self.prestige_tiers.iter())
            .copied()
            .collect()
    }
}

/// Role positions in a guild and the highest position the bot may manage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleHierarchy {
    positions: HashMap<u64, u16>,
    ceiling: Option<u16>,
}

impl RoleHierarchy {
    /// Creates a hierarchy from known role positions.
    ///
    /// # Arguments
    /// - `positions` - Role id -> position in the guild's role list
    /// - `ceiling` - Highest manageable position, `None` if nothing is manageable
    pub fn new(positions: HashMap<u64, u16>, ceiling: Option<u16>) -> Self {
        Self { positions, ceiling }
    }

    /// Builds the hierarchy from the guild's roles and the roles the bot holds.
    ///
    /// Discord only lets a member manage roles strictly below its own highest
    /// role, so the ceiling is one below the bot's top position.
    pub fn from_roles<'a>(roles: impl IntoIterator<Item = &'a Role>, bot_role_ids: &[u64]) -> Self {
        let positions: HashMap<u64, u16> = roles
            .into_iter()
            .map(|role| (role.id.get(), role.position))
            .collect();

        let bot_top = bot_role_ids
            .iter()
            .filter_map(|role_id| positions.get(role_id))
            .copied()
            .max()
            .unwrap_or(0);

        Self {
            positions,
            ceiling: bot_top.checked_sub(1),
        }
    }

    /// Whether the bot may grant `role_id`. Unknown roles cannot be granted.
    pub fn can_manage(&self, role_id: u64) -> bool {
        match (self.positions.get(&role_id), self.ceiling) {
            (Some(position), Some(ceiling)) => *position <= ceiling,
            _ => false,
        }
    }
}

/// A member's current standing and roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRoleState {
    pub member_id: u64,
    pub level: u64,
    pub prestige: u64,
    pub current_roles: BTreeSet<u64>,
}

/// Role changes planned for one member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDiff {
    pub member_id: u64,
    pub added: BTreeSet<u64>,
    pub removed: BTreeSet<u64>,
    /// Desired roles above the hierarchy ceiling. Recorded, never granted.
    pub skipped: BTreeSet<u64>,
}

impl RoleDiff {
    /// Whether applying the diff would change anything.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// The member's full role list once the diff is applied.
    ///
    /// Used to issue additions and removals as one role-membership edit.
    pub fn resulting_roles(&self, current: &BTreeSet<u64>) -> Vec<u64> {
        current
            .iter()
            .filter(|role_id| !self.removed.contains(role_id))
            .chain(self.added.iter())
            .copied()
            .collect::<BTreeSet<u64>>()
            .into_iter()
            .collect()
    }
}

/// Summary of reconciling every member of a guild.
#[derive(Debug, Default)]
pub struct RosterReport {
    /// Members examined.
    pub processed: usize,
    /// Members whose roles were changed.
    pub changed: usize,
    pub roles_added: usize,
    pub roles_removed: usize,
    pub roles_skipped: usize,
    /// One entry per member whose mutation was rejected.
    pub failures: Vec<ExternalFailure>,
}
