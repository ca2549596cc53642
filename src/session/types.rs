//! Session modes, lifecycle phases, and termination signals.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use super::error::SessionError;

/// Game mode, chosen once at the start of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Unset,
    /// Game ends after a fixed number of catches
    FixedCount,
    /// Coins drain over wall-clock time; game ends when the player runs dry
    Timed,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Unset => write!(f, "unset"),
            Mode::FixedCount => write!(f, "10fish"),
            Mode::Timed => write!(f, "timed"),
        }
    }
}

impl FromStr for Mode {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "10fish" | "fixed" | "fixed-count" => Ok(Mode::FixedCount),
            "timed" => Ok(Mode::Timed),
            other => Err(SessionError::InvalidMode(other.to_string())),
        }
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No mode chosen yet
    Uninitialized,
    /// Mode chosen, neither location nor lure set
    ModeChosen,
    /// One of location and lure set
    Configuring,
    /// Ready to fish
    Active,
    /// Game over
    Terminated,
}

/// Why the session is waiting on a sell-or-quit decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingReason {
    /// Fixed-count quota filled; selling is a last chance before the end
    QuotaReached,
    /// Timed balance dropped below the minimum; selling may keep the game alive
    OutOfCoins,
}

impl fmt::Display for PendingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingReason::QuotaReached => write!(f, "catch quota reached"),
            PendingReason::OutOfCoins => write!(f, "not enough coins"),
        }
    }
}

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    QuotaReached,
    OutOfCoins,
    Quit,
}

/// Result of a termination check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationStatus {
    /// Keep playing
    Active,
    /// The player must decide whether to sell before play can go on
    PendingSellDecision(PendingReason),
    /// Game over
    Terminated(TerminationReason),
}

/// The player's answer to a pending sell decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellDecision {
    Sell,
    Decline,
}

/// What resolving a sell decision did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionOutcome {
    /// Coins earned, if the player sold
    pub sold: Option<f64>,
    pub status: TerminationStatus,
}

/// One application of timed-mode decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayEvent {
    /// Number of intervals charged by this poll
    pub steps: u32,
    /// Total coins deducted
    pub deducted: f64,
    pub balance_after: f64,
    pub at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parses_menu_names() {
        assert_eq!("10fish".parse::<Mode>().unwrap(), Mode::FixedCount);
        assert_eq!(" Timed ".parse::<Mode>().unwrap(), Mode::Timed);
        assert!(matches!(
            "endless".parse::<Mode>(),
            Err(SessionError::InvalidMode(ref s)) if s == "endless"
        ));
    }

    #[test]
    fn test_mode_display_round_trips_through_parse() {
        for mode in [Mode::FixedCount, Mode::Timed] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }
}
