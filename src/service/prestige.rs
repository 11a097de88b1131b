//! Prestige promotion.
//!
//! Promotion moves a member to the next configured tier and resets their level
//! and XP to zero. Roles are brought in line afterwards by the role reconciler.

use crate::{
    error::prestige::PrestigeError,
    model::{profile::Profile, settings::PrestigeTier},
};

/// Result of a prestige change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Promotion {
    pub old_prestige: u64,
    pub new_prestige: u64,
    /// Level held before the reset.
    pub old_level: u64,
    /// XP held before the reset.
    pub old_xp: u64,
}

pub struct PrestigeManager;

impl PrestigeManager {
    /// The tier a member would be promoted into next.
    ///
    /// # Returns
    /// - `Ok(&PrestigeTier)` - The first tier above the member's prestige
    /// - `Err(PrestigeError::NotConfigured)` - No tiers configured
    /// - `Err(PrestigeError::AlreadyMaxed)` - Member holds the highest tier
    pub fn next_tier<'a>(
        profile: &Profile,
        tiers: &'a [PrestigeTier],
    ) -> Result<&'a PrestigeTier, PrestigeError> {
        if tiers.is_empty() {
            return Err(PrestigeError::NotConfigured);
        }

        usize::try_from(profile.prestige)
            .ok()
            .and_then(|index| tiers.get(index))
            .ok_or(PrestigeError::AlreadyMaxed(profile.prestige))
    }

    /// Whether the member currently meets every promotion precondition.
    pub fn can_promote(profile: &Profile, tiers: &[PrestigeTier]) -> bool {
        Self::next_tier(profile, tiers).is_ok_and(|tier| profile.level >= tier.activation_level)
    }

    /// Promotes a member into the next tier.
    ///
    /// Increments prestige and resets level and XP to zero. Activity counters
    /// are kept. The profile is unchanged when an error is returned.
    ///
    /// # Arguments
    /// - `profile` - Member profile to promote
    /// - `tiers` - Guild prestige tiers in tier order
    ///
    /// # Returns
    /// - `Ok(Promotion)` - Member promoted
    /// - `Err(PrestigeError)` - Tiers missing, level too low or already maxed
    pub fn promote(
        profile: &mut Profile,
        tiers: &[PrestigeTier],
    ) -> Result<Promotion, PrestigeError> {
        let tier = Self::next_tier(profile, tiers)?;
        if profile.level < tier.activation_level {
            return Err(PrestigeError::LevelTooLow {
                required: tier.activation_level,
                current: profile.level,
            });
        }

        let promotion = Promotion {
            old_prestige: profile.prestige,
            new_prestige: profile.prestige + 1,
            old_level: profile.level,
            old_xp: profile.xp,
        };

        profile.prestige = promotion.new_prestige;
        profile.level = 0;
        profile.xp = 0;

        Ok(promotion)
    }

    /// Administrative override setting a member's prestige directly.
    ///
    /// Only 0 or a configured tier may be set. Level and XP are left as they are.
    ///
    /// # Returns
    /// - `Ok(Promotion)` - Prestige updated
    /// - `Err(PrestigeError::UnknownTier)` - No tier with that number
    pub fn set_prestige(
        profile: &mut Profile,
        prestige: u64,
        tiers: &[PrestigeTier],
    ) -> Result<Promotion, PrestigeError> {
        if prestige > tiers.len() as u64 {
            return Err(PrestigeError::UnknownTier(prestige));
        }

        let promotion = Promotion {
            old_prestige: profile.prestige,
            new_prestige: prestige,
            old_level: profile.level,
            old_xp: profile.xp,
        };
        profile.prestige = prestige;

        Ok(promotion)
    }
}
