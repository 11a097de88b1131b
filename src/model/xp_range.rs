//! Inclusive XP ranges used for base awards and bonuses.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::config::ConfigError;

/// Inclusive range of XP values with `min <= max`.
///
/// Bounds are unsigned, so negative values are unrepresentable. A bonus that
/// does not apply is modelled by the absence of a range (a missing map key or
/// `None`), never by a `[0, 0]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawXpRange")]
pub struct XpRange {
    pub min: u64,
    pub max: u64,
}

#[derive(Deserialize)]
struct RawXpRange {
    min: u64,
    max: u64,
}

impl TryFrom<RawXpRange> for XpRange {
    type Error = ConfigError;

    fn try_from(raw: RawXpRange) -> Result<Self, Self::Error> {
        XpRange::new(raw.min, raw.max)
    }
}

impl XpRange {
    /// Default message award range when a guild has not configured one.
    pub const DEFAULT_MESSAGE: XpRange = XpRange { min: 3, max: 6 };

    /// Creates a validated range.
    ///
    /// # Returns
    /// - `Ok(XpRange)` - Range with `min <= max`
    /// - `Err(ConfigError::InvalidXpRange)` - `min > max`
    pub fn new(min: u64, max: u64) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidXpRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Range containing a single value.
    pub fn fixed(value: u64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Adds another range bound-by-bound, saturating at `u64::MAX`.
    pub fn stacked(self, bonus: XpRange) -> XpRange {
        XpRange {
            min: self.min.saturating_add(bonus.min),
            max: self.max.saturating_add(bonus.max),
        }
    }

    /// Draws a uniformly distributed value from `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        rng.random_range(self.min..=self.max)
    }
}

impl Default for XpRange {
    fn default() -> Self {
        Self::DEFAULT_MESSAGE
    }
}

impl std::fmt::Display for XpRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}
