//! Game rule configuration.

use super::constants::*;
use chrono::Duration;

/// How many decay steps a single poll may apply in timed mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecayPolicy {
    /// At most one decay per poll, even if several intervals elapsed.
    #[default]
    SingleStep,
    /// One decay per whole elapsed interval since the anchor.
    CatchUp,
}

/// Tunable rules for a fishing session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Coins the player starts with
    pub starting_balance: f64,

    /// Catches that end a fixed-count game
    pub max_fish: usize,

    /// Timed mode ends below this balance unless the player sells back above it
    pub min_balance: f64,

    /// Coins deducted per decay tick
    pub decay_amount: f64,

    /// Wall-clock time between decay ticks
    pub decay_interval: Duration,

    /// Upper bound on the effective catch probability
    pub max_catch_chance: f64,

    /// Whether missed intervals are caught up on the next poll
    pub decay_policy: DecayPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            max_fish: MAX_FISH,
            min_balance: MIN_BALANCE_TO_CONTINUE,
            decay_amount: DECAY_AMOUNT,
            decay_interval: Duration::seconds(DECAY_INTERVAL_SECONDS),
            max_catch_chance: MAX_CATCH_CHANCE,
            decay_policy: DecayPolicy::SingleStep,
        }
    }
}

impl GameConfig {
    /// Default rules with a custom decay interval (useful for short demo games).
    pub fn with_decay_seconds(seconds: i64) -> Self {
        Self {
            decay_interval: Duration::seconds(seconds.max(1)),
            ..Default::default()
        }
    }

    /// Default rules with missed decay intervals applied in bulk.
    pub fn catch_up_decay() -> Self {
        Self {
            decay_policy: DecayPolicy::CatchUp,
            ..Default::default()
        }
    }
}
