//! Estimates how long reaching a level takes through messages alone.
//!
//! The simulation draws one award per message and waits the cooldown plus a
//! random break after every message, the last one included: most breaks are
//! long (1 to 120 minutes), the rest short (5 seconds to 5 minutes).

use rand::Rng;

use crate::model::{algorithm::Algorithm, xp_range::XpRange};

const LONG_BREAK_CHANCE: f64 = 0.75;
const LONG_BREAK_SECONDS: (u64, u64) = (60, 7200);
const SHORT_BREAK_SECONDS: (u64, u64) = (5, 300);

/// Simulated XP and time for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEstimate {
    pub level: u64,
    /// Total XP required for the level.
    pub xp: u64,
    /// Seconds from zero XP. `None` if the range can never award XP.
    pub seconds: Option<u64>,
}

struct Simulation<'a, R: Rng + ?Sized> {
    range: XpRange,
    cooldown: u64,
    rng: &'a mut R,
    gained: u64,
    seconds: u64,
}

impl<R: Rng + ?Sized> Simulation<'_, R> {
    fn pause(&mut self) -> u64 {
        let (low, high) = if self.rng.random_bool(LONG_BREAK_CHANCE) {
            LONG_BREAK_SECONDS
        } else {
            SHORT_BREAK_SECONDS
        };
        self.cooldown + self.rng.random_range(low..=high)
    }

    fn send_message(&mut self) {
        self.gained = self.gained.saturating_add(self.range.sample(self.rng));
        let pause = self.pause();
        self.seconds = self.seconds.saturating_add(pause);
    }

    fn run_until(&mut self, target: u64) -> Option<u64> {
        if self.gained < target && self.range.max == 0 {
            return None;
        }
        while self.gained < target {
            self.send_message();
        }
        Some(self.seconds)
    }
}

/// Simulated seconds needed to earn `xp_needed` XP.
///
/// At least one message is simulated, so even zero XP costs one wait.
///
/// # Arguments
/// - `xp_needed` - XP to earn
/// - `range` - Message award range, including any bonuses
/// - `cooldown` - Message cooldown in seconds
/// - `rng` - Random source for awards and breaks
///
/// # Returns
/// - `Some(u64)` - Simulated seconds
/// - `None` - Range maximum is zero and XP is needed
pub fn time_to_level<R: Rng + ?Sized>(
    xp_needed: u64,
    range: XpRange,
    cooldown: u64,
    rng: &mut R,
) -> Option<u64> {
    let mut simulation = Simulation {
        range,
        cooldown,
        rng,
        gained: 0,
        seconds: 0,
    };
    if xp_needed == 0 {
        simulation.send_message();
    }
    simulation.run_until(xp_needed)
}

/// Estimates XP and time for levels `1..=levels` in one continuous simulation.
pub fn level_table<R: Rng + ?Sized>(
    algorithm: &Algorithm,
    range: XpRange,
    cooldown: u64,
    levels: u64,
    rng: &mut R,
) -> Vec<LevelEstimate> {
    let mut simulation = Simulation {
        range,
        cooldown,
        rng,
        gained: 0,
        seconds: 0,
    };

    (1..=levels)
        .map(|level| {
            let xp = algorithm.get_xp_for_level(level);
            LevelEstimate {
                level,
                xp,
                seconds: simulation.run_until(xp),
            }
        })
        .collect()
}
