//! XP <-> level conversion.
//!
//! The XP required for a level is `base * level^exponent`, rounded half-up.
//! Converting back searches the rounded thresholds for the highest level whose
//! threshold does not exceed the XP. On shallow curves neighbouring levels can
//! round to the same threshold; that XP then maps to the highest of them.

use serde::{Deserialize, Serialize};

use crate::error::config::ConfigError;

/// Highest level the engine will report.
pub const MAX_LEVEL: u64 = u32::MAX as u64;

/// Leveling curve parameters for a guild.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAlgorithm")]
pub struct Algorithm {
    /// XP multiplier.
    pub base: u64,
    /// Curve exponent in `(0, 10]`.
    pub exponent: f64,
}

#[derive(Deserialize)]
struct RawAlgorithm {
    base: u64,
    exponent: f64,
}

impl TryFrom<RawAlgorithm> for Algorithm {
    type Error = ConfigError;

    fn try_from(raw: RawAlgorithm) -> Result<Self, Self::Error> {
        Algorithm::new(raw.base, raw.exponent)
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self {
            base: 100,
            exponent: 2.0,
        }
    }
}

impl Algorithm {
    /// Creates an algorithm after validating the exponent.
    ///
    /// A zero base is accepted here, matching what administrators may store, but
    /// every XP-to-level conversion with it fails with `ConfigError::ZeroBase`.
    ///
    /// # Returns
    /// - `Ok(Algorithm)` - Exponent in `(0, 10]`
    /// - `Err(ConfigError::InvalidExponent)` - Exponent not positive, above 10, or NaN
    pub fn new(base: u64, exponent: f64) -> Result<Self, ConfigError> {
        let algorithm = Self { base, exponent };
        algorithm.validate_exponent()?;
        Ok(algorithm)
    }

    /// Checks that the algorithm can convert XP to levels.
    ///
    /// # Returns
    /// - `Ok(())` - Base above zero and exponent in `(0, 10]`
    /// - `Err(ConfigError)` - `ZeroBase` or `InvalidExponent`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base == 0 {
            return Err(ConfigError::ZeroBase);
        }
        self.validate_exponent()
    }

    fn validate_exponent(&self) -> Result<(), ConfigError> {
        if self.exponent > 0.0 && self.exponent <= 10.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidExponent(self.exponent))
        }
    }

    /// Total XP required to reach `level`.
    ///
    /// Computes `round(base * level^exponent)` with halves rounded up. Results
    /// beyond `u64::MAX` saturate.
    pub fn get_xp_for_level(&self, level: u64) -> u64 {
        let xp = self.base as f64 * (level as f64).powf(self.exponent);
        xp.round() as u64
    }

    /// Level reached with `xp` total XP.
    ///
    /// # Arguments
    /// - `xp` - Total XP held by a member
    ///
    /// # Returns
    /// - `Ok(u64)` - Highest level whose XP threshold is at most `xp`
    /// - `Err(ConfigError::ZeroBase)` - Base is zero
    /// - `Err(ConfigError::InvalidExponent)` - Exponent outside `(0, 10]`
    pub fn get_level_for_xp(&self, xp: u64) -> Result<u64, ConfigError> {
        self.validate()?;

        // Thresholds never decrease, so gallop up to a bracket then bisect it.
        let mut reached = 0;
        let mut beyond = 1;
        while self.get_xp_for_level(beyond) <= xp {
            if beyond == MAX_LEVEL {
                return Ok(MAX_LEVEL);
            }
            reached = beyond;
            beyond = beyond.saturating_mul(2).min(MAX_LEVEL);
        }

        while beyond - reached > 1 {
            let mid = reached + (beyond - reached) / 2;
            if self.get_xp_for_level(mid) <= xp {
                reached = mid;
            } else {
                beyond = mid;
            }
        }

        Ok(reached)
    }
}
