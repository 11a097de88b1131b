use super::*;
use crate::service::role_sync::{reconcile_roles, RoleSyncService};

mod reconcile_member;
mod reconcile_roles;
mod reconcile_roster;

/// Level roles 1..=5 mapped to roles 101..=105.
fn five_level_roles(autoremove: bool) -> RoleConfig {
    RoleConfig {
        level_roles: (1..=5).map(|level| (level, 100 + level)).collect(),
        prestige_tiers: Vec::new(),
        stack_prestige_roles: false,
        autoremove,
    }
}

/// Prestige tiers 1..=3 mapped to roles 901..=903.
fn three_prestige_tiers(stacking: bool) -> RoleConfig {
    RoleConfig {
        level_roles: Default::default(),
        prestige_tiers: vec![901, 902, 903],
        stack_prestige_roles: stacking,
        autoremove: false,
    }
}

fn member(level: u64, prestige: u64, current_roles: &[u64]) -> MemberRoleState {
    MemberRoleState {
        member_id: MEMBER_ID,
        level,
        prestige,
        current_roles: current_roles.iter().copied().collect(),
    }
}
