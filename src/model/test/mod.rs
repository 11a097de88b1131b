use crate::{
    error::config::ConfigError,
    model::{
        algorithm::Algorithm,
        db::Db,
        emoji::{Emoji, Emojis},
        profile::Profile,
        role::{RoleConfig, RoleDiff, RoleHierarchy},
        settings::{GuildSettings, PrestigeTier},
        xp_range::XpRange,
    },
};
use rand::{rngs::StdRng, SeedableRng};
use std::collections::{BTreeSet, HashMap};

mod db;
