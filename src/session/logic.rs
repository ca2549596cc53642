//! The session state machine.
//!
//! A [`Session`] processes one command at a time and never blocks. Whenever a
//! command changes progress (catch count or balance) the mode's termination
//! predicate is re-evaluated; if it holds the session parks in a pending
//! sell decision, and every mutating command except
//! [`Session::resolve_sell_decision`] and [`Session::quit`] is refused until
//! the host loop answers it.
//!
//! Timed-mode decay is polled: the clock is only read in
//! [`Session::check_termination`], which the host calls once per command
//! cycle.

use super::error::{CatalogKind, Precondition, SessionError};
use super::types::*;
use crate::catalog::{Catalog, Location, Lure};
use crate::core::{Clock, DecayPolicy, GameConfig, SystemClock};
use crate::fishing::{attempt_with_cap, CatchRecord, Outcome};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

/// A single player's game.
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    catalog: Arc<Catalog>,
    config: GameConfig,
    clock: C,
    mode: Mode,
    active_location: Option<Arc<Location>>,
    active_lure: Option<Arc<Lure>>,
    catch_history: Vec<CatchRecord>,
    balance: f64,
    /// Start of the current decay interval (timed mode only)
    timer_anchor: Option<DateTime<Utc>>,
    pending: Option<PendingReason>,
    termination: Option<TerminationReason>,
    decay_events: Vec<DecayEvent>,
}

impl Session<SystemClock> {
    /// A session with the standard rules on the real clock.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_clock(catalog, GameConfig::default(), SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(catalog: Arc<Catalog>, config: GameConfig, clock: C) -> Self {
        let balance = config.starting_balance;
        Self {
            catalog,
            config,
            clock,
            mode: Mode::Unset,
            active_location: None,
            active_lure: None,
            catch_history: Vec::new(),
            balance,
            timer_anchor: None,
            pending: None,
            termination: None,
            decay_events: Vec::new(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────────

    /// Chooses the game mode. Timed mode starts its decay timer immediately.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), SessionError> {
        self.ensure_mutable()?;
        if self.mode != Mode::Unset {
            return Err(SessionError::ModeAlreadySet(self.mode));
        }
        if mode == Mode::Unset {
            return Err(SessionError::InvalidMode(mode.to_string()));
        }

        self.mode = mode;
        if mode == Mode::Timed {
            self.timer_anchor = Some(self.clock.now());
        }
        info!(%mode, "game mode chosen");
        Ok(())
    }

    /// Moves to the named lake. An unknown name leaves the session unchanged.
    pub fn set_location(&mut self, name: &str) -> Result<(), SessionError> {
        self.ensure_configurable()?;
        let location = self.catalog.location(name).ok_or_else(|| {
            debug!(name, "unknown lake");
            SessionError::NotFound {
                kind: CatalogKind::Location,
                name: name.to_string(),
            }
        })?;
        debug!(location = %location.name, "moved");
        self.active_location = Some(location);
        Ok(())
    }

    /// Switches to the named bait. An unknown name leaves the session unchanged.
    pub fn set_lure(&mut self, name: &str) -> Result<(), SessionError> {
        self.ensure_configurable()?;
        let lure = self.catalog.lure(name).ok_or_else(|| {
            debug!(name, "unknown bait");
            SessionError::NotFound {
                kind: CatalogKind::Lure,
                name: name.to_string(),
            }
        })?;
        debug!(lure = %lure.name, "changed bait");
        self.active_lure = Some(lure);
        Ok(())
    }

    /// Casts once at the active location with the active lure.
    ///
    /// A catch is appended to the history; a miss changes nothing. Engine
    /// failures are returned without touching the session.
    pub fn attempt_catch(&mut self, rng: &mut impl Rng) -> Result<Outcome, SessionError> {
        self.ensure_mutable()?;
        let outcome = {
            let location = self
                .active_location
                .as_deref()
                .ok_or(Precondition::MissingLocation)?;
            let lure = self.active_lure.as_deref().ok_or(Precondition::MissingLure)?;
            attempt_with_cap(location, lure, self.config.max_catch_chance, rng)?
        };

        match &outcome {
            Outcome::Caught { species, weight } => {
                debug!(species = %species, weight, "caught");
                self.catch_history.push(CatchRecord {
                    species_name: species.clone(),
                    weight: *weight,
                });
                self.evaluate_predicates();
            }
            Outcome::Missed => debug!("fish got away"),
        }
        Ok(outcome)
    }

    /// Sells the whole catch history, one coin per kg. Returns the coins
    /// earned (zero for an empty history).
    pub fn sell(&mut self) -> Result<f64, SessionError> {
        self.ensure_mutable()?;
        let total = self.sell_all();
        self.evaluate_predicates();
        Ok(total)
    }

    /// Answers a pending sell decision.
    ///
    /// A filled quota always ends the game. Running out of coins ends it
    /// unless selling restores the minimum balance, in which case the decay
    /// timer restarts from now.
    pub fn resolve_sell_decision(
        &mut self,
        decision: SellDecision,
    ) -> Result<DecisionOutcome, SessionError> {
        if self.termination.is_some() {
            return Err(SessionError::SessionTerminated);
        }
        let reason = self.pending.ok_or(SessionError::NoPendingDecision)?;

        let sold = match decision {
            SellDecision::Sell => Some(self.sell_all()),
            SellDecision::Decline => None,
        };

        let status = match reason {
            PendingReason::QuotaReached => self.terminate(TerminationReason::QuotaReached),
            PendingReason::OutOfCoins => {
                if sold.is_some() && self.balance >= self.config.min_balance {
                    self.pending = None;
                    self.timer_anchor = Some(self.clock.now());
                    info!(balance = self.balance, "sold back above the minimum, play continues");
                    TerminationStatus::Active
                } else {
                    self.terminate(TerminationReason::OutOfCoins)
                }
            }
        };
        Ok(DecisionOutcome { sold, status })
    }

    /// Ends the session at the player's request.
    pub fn quit(&mut self) -> Result<(), SessionError> {
        if self.termination.is_some() {
            return Err(SessionError::SessionTerminated);
        }
        self.terminate(TerminationReason::Quit);
        Ok(())
    }

    /// Polls timed-mode decay and evaluates the mode's termination predicate.
    ///
    /// Decay is applied before the balance is checked. No decay accrues while
    /// a sell decision is pending.
    pub fn check_termination(&mut self) -> TerminationStatus {
        if self.termination.is_none() && self.pending.is_none() && self.mode == Mode::Timed {
            self.poll_decay();
        }
        self.evaluate_predicates();
        self.status()
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Current termination status without polling the clock.
    pub fn status(&self) -> TerminationStatus {
        if let Some(reason) = self.termination {
            TerminationStatus::Terminated(reason)
        } else if let Some(reason) = self.pending {
            TerminationStatus::PendingSellDecision(reason)
        } else {
            TerminationStatus::Active
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.termination.is_some() {
            return SessionPhase::Terminated;
        }
        match (self.mode, &self.active_location, &self.active_lure) {
            (Mode::Unset, _, _) => SessionPhase::Uninitialized,
            (_, None, None) => SessionPhase::ModeChosen,
            (_, Some(_), Some(_)) => SessionPhase::Active,
            _ => SessionPhase::Configuring,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Catches since the last sale, most recent last.
    pub fn catch_history(&self) -> &[CatchRecord] {
        &self.catch_history
    }

    /// Combined weight of the unsold catch.
    pub fn catch_weight(&self) -> f64 {
        self.catch_history.iter().map(|c| c.weight).sum()
    }

    pub fn active_location(&self) -> Option<&Location> {
        self.active_location.as_deref()
    }

    pub fn active_lure(&self) -> Option<&Lure> {
        self.active_lure.as_deref()
    }

    pub fn timer_anchor(&self) -> Option<DateTime<Utc>> {
        self.timer_anchor
    }

    /// Time left before the next decay tick, if the decay timer is running.
    pub fn time_until_decay(&self) -> Option<Duration> {
        let anchor = self.timer_anchor?;
        let remaining = self.config.decay_interval - (self.clock.now() - anchor);
        Some(remaining.max(Duration::zero()))
    }

    pub fn pending_decision(&self) -> Option<PendingReason> {
        self.pending
    }

    pub fn termination_reason(&self) -> Option<TerminationReason> {
        self.termination
    }

    pub fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Decay events since the last drain, oldest first.
    pub fn drain_decay_events(&mut self) -> Vec<DecayEvent> {
        std::mem::take(&mut self.decay_events)
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn ensure_mutable(&self) -> Result<(), SessionError> {
        if self.termination.is_some() {
            return Err(SessionError::SessionTerminated);
        }
        if let Some(reason) = self.pending {
            return Err(SessionError::DecisionPending(reason));
        }
        Ok(())
    }

    fn ensure_configurable(&self) -> Result<(), SessionError> {
        self.ensure_mutable()?;
        if self.mode == Mode::Unset {
            return Err(Precondition::ModeNotChosen.into());
        }
        Ok(())
    }

    fn sell_all(&mut self) -> f64 {
        let total = self.catch_weight();
        self.balance += total;
        let count = self.catch_history.len();
        self.catch_history.clear();
        debug!(count, total, balance = self.balance, "sold catch");
        total
    }

    fn evaluate_predicates(&mut self) {
        if self.termination.is_some() || self.pending.is_some() {
            return;
        }
        let pending = match self.mode {
            Mode::FixedCount if self.catch_history.len() >= self.config.max_fish => {
                Some(PendingReason::QuotaReached)
            }
            Mode::Timed if self.balance < self.config.min_balance => Some(PendingReason::OutOfCoins),
            _ => None,
        };
        if let Some(reason) = pending {
            info!(%reason, "sell decision required");
            self.pending = Some(reason);
        }
    }

    fn poll_decay(&mut self) {
        let Some(anchor) = self.timer_anchor else {
            return;
        };
        let now = self.clock.now();
        let interval = self.config.decay_interval;
        let elapsed = now - anchor;
        if elapsed < interval {
            return;
        }

        let (steps, next_anchor) = match self.config.decay_policy {
            DecayPolicy::SingleStep => (1, now),
            DecayPolicy::CatchUp => {
                let interval_ms = interval.num_milliseconds().max(1);
                let steps = elapsed.num_milliseconds() / interval_ms;
                // Keep the partial interval so the next tick stays on schedule
                let next = anchor + Duration::milliseconds(steps * interval_ms);
                (u32::try_from(steps).unwrap_or(u32::MAX), next)
            }
        };

        let deducted = self.config.decay_amount * steps as f64;
        self.balance -= deducted;
        self.timer_anchor = Some(next_anchor);
        debug!(steps, deducted, balance = self.balance, "coins decayed");
        self.decay_events.push(DecayEvent {
            steps,
            deducted,
            balance_after: self.balance,
            at: now,
        });
    }

    fn terminate(&mut self, reason: TerminationReason) -> TerminationStatus {
        self.pending = None;
        self.termination = Some(reason);
        info!(
            ?reason,
            balance = self.balance,
            unsold = self.catch_history.len(),
            "session ended"
        );
        TerminationStatus::Terminated(reason)
    }
}
