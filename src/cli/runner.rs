//! Interactive game loop.
//!
//! Owns all blocking input. The session is polled once per command cycle;
//! decay events are printed as they arrive and pending sell decisions are
//! turned into yes/no questions. Running out of input ends the game as if the
//! player had quit.

use super::commands::{parse_command, parse_yes_no, Command, COMMAND_PROMPT, HELP_TEXT};
use crate::core::Clock;
use crate::session::{
    Mode, PendingReason, SellDecision, Session, TerminationReason, TerminationStatus,
};
use rand::Rng;
use std::io::{self, BufRead, Write};

/// How a game ended.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub mode: Mode,
    pub reason: Option<TerminationReason>,
    pub balance: f64,
    /// Fish still held when the game ended
    pub unsold: usize,
}

/// Terminal front end for one session.
pub struct GameRunner<'a, C: Clock, R: Rng, I: BufRead, O: Write> {
    session: Session<C>,
    rng: &'a mut R,
    input: I,
    output: O,
}

impl<'a, C: Clock, R: Rng, I: BufRead, O: Write> GameRunner<'a, C, R, I, O> {
    pub fn new(session: Session<C>, rng: &'a mut R, input: I, output: O) -> Self {
        Self {
            session,
            rng,
            input,
            output,
        }
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    /// Plays a full game: mode, lake and bait selection, then the command loop.
    ///
    /// `preset_mode` skips the mode question.
    pub fn run(&mut self, preset_mode: Option<Mode>) -> io::Result<GameSummary> {
        writeln!(self.output, "Welcome to the Fishing Game! Good luck!")?;

        if self.setup(preset_mode)? {
            self.play()?;
        } else if !self.session.is_terminated() {
            // Input closed before the game started
            let _ = self.session.quit();
        }

        Ok(GameSummary {
            mode: self.session.mode(),
            reason: self.session.termination_reason(),
            balance: self.session.balance(),
            unsold: self.session.catch_history().len(),
        })
    }

    /// Returns false if input ran out before the session was ready.
    fn setup(&mut self, preset_mode: Option<Mode>) -> io::Result<bool> {
        if let Some(mode) = preset_mode {
            if let Err(e) = self.session.set_mode(mode) {
                writeln!(self.output, "{}", e)?;
            }
        }
        while self.session.mode() == Mode::Unset {
            let Some(line) = self.prompt("Choose game mode (10fish/timed): ")? else {
                return Ok(false);
            };
            match line.parse::<Mode>().and_then(|mode| self.session.set_mode(mode)) {
                Ok(()) => {}
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }

        self.show_lakes()?;
        self.show_baits()?;

        while self.session.active_location().is_none() {
            let Some(name) = self.prompt("Select a lake: ")? else {
                return Ok(false);
            };
            self.change_location(&name)?;
        }
        while self.session.active_lure().is_none() {
            let Some(name) = self.prompt("Select a bait: ")? else {
                return Ok(false);
            };
            self.change_bait(&name)?;
        }
        Ok(true)
    }

    fn play(&mut self) -> io::Result<()> {
        loop {
            let status = self.session.check_termination();
            self.report_decay()?;

            match status {
                TerminationStatus::Terminated(_) => return Ok(()),
                TerminationStatus::PendingSellDecision(reason) => {
                    if !self.resolve_pending(reason)? {
                        return Ok(());
                    }
                    continue;
                }
                TerminationStatus::Active => {}
            }

            let Some(line) = self.prompt(COMMAND_PROMPT)? else {
                let _ = self.session.quit();
                return Ok(());
            };
            if !self.dispatch(parse_command(&line))? {
                return Ok(());
            }
        }
    }

    /// Runs one command. Returns false when the player quits.
    fn dispatch(&mut self, command: Command) -> io::Result<bool> {
        match command {
            Command::Cast => self.cast()?,
            Command::ChangeBait(name) => {
                self.show_baits()?;
                let name = match name {
                    Some(name) => Some(name),
                    None => self.prompt("Enter new bait: ")?,
                };
                if let Some(name) = name {
                    self.change_bait(&name)?;
                }
            }
            Command::ChangeLocation(name) => {
                self.show_lakes()?;
                let name = match name {
                    Some(name) => Some(name),
                    None => self.prompt("Enter lake name: ")?,
                };
                if let Some(name) = name {
                    self.change_location(&name)?;
                }
            }
            Command::ShowCatch => self.show_catch()?,
            Command::SellFish => match self.session.sell() {
                Ok(total) => self.report_sale(total)?,
                Err(e) => writeln!(self.output, "{}", e)?,
            },
            Command::Status => self.show_status()?,
            Command::Help => writeln!(self.output, "{}", HELP_TEXT)?,
            Command::Quit => {
                let _ = self.session.quit();
                writeln!(self.output, "Thanks for fishing!")?;
                return Ok(false);
            }
            Command::Unknown(_) => writeln!(self.output, "Invalid command.")?,
        }
        Ok(true)
    }

    /// Asks the sell question for a pending decision. Returns false when the
    /// game is over.
    fn resolve_pending(&mut self, reason: PendingReason) -> io::Result<bool> {
        let question = match reason {
            PendingReason::QuotaReached => format!(
                "You have caught {} fish. Do you want to sell them before ending the game? (yes/no): ",
                self.session.config().max_fish
            ),
            PendingReason::OutOfCoins => {
                writeln!(
                    self.output,
                    "Not enough coins to continue. Sell fish to continue or quit."
                )?;
                self.show_catch()?;
                "Do you want to sell your fish to continue? (yes/no): ".to_string()
            }
        };

        let decision = loop {
            let Some(line) = self.prompt(&question)? else {
                break SellDecision::Decline;
            };
            match parse_yes_no(&line) {
                Some(decision) => break decision,
                None => writeln!(self.output, "You have to choose yes or no.")?,
            }
        };

        let outcome = match self.session.resolve_sell_decision(decision) {
            Ok(outcome) => outcome,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(false);
            }
        };
        if let Some(total) = outcome.sold {
            self.report_sale(total)?;
        }

        match (reason, outcome.status) {
            (_, TerminationStatus::Active) => {
                writeln!(self.output, "You can continue fishing.")?;
                Ok(true)
            }
            (PendingReason::QuotaReached, _) => {
                writeln!(
                    self.output,
                    "Game over! You caught {} fish.",
                    self.session.config().max_fish
                )?;
                Ok(false)
            }
            (PendingReason::OutOfCoins, _) => {
                writeln!(
                    self.output,
                    "Game over! You don't have enough coins to continue."
                )?;
                Ok(false)
            }
        }
    }

    fn cast(&mut self) -> io::Result<()> {
        match self.session.attempt_catch(&mut *self.rng) {
            Ok(crate::fishing::Outcome::Caught { species, weight }) => writeln!(
                self.output,
                "Wow! You caught a {} weighing {:.2} kg!",
                species, weight
            ),
            Ok(crate::fishing::Outcome::Missed) => {
                writeln!(self.output, "Oops. The fish got away!")
            }
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn change_location(&mut self, name: &str) -> io::Result<()> {
        match self.session.set_location(name.trim()) {
            Ok(()) => writeln!(self.output, "Moved to {}.", name.trim()),
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn change_bait(&mut self, name: &str) -> io::Result<()> {
        match self.session.set_lure(name.trim()) {
            Ok(()) => writeln!(self.output, "Changed bait to {}.", name.trim()),
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn show_lakes(&mut self) -> io::Result<()> {
        writeln!(self.output, "Available lakes:")?;
        for lake in self.session.catalog().locations() {
            writeln!(self.output, "- {}", lake.name)?;
        }
        Ok(())
    }

    fn show_baits(&mut self) -> io::Result<()> {
        writeln!(self.output, "Available baits:")?;
        for bait in self.session.catalog().lures() {
            writeln!(
                self.output,
                "- {} (Catch rate modifier: {})",
                bait.name, bait.catch_rate_modifier
            )?;
        }
        Ok(())
    }

    fn show_catch(&mut self) -> io::Result<()> {
        let history = self.session.catch_history();
        if history.is_empty() {
            return writeln!(self.output, "No fish caught yet.");
        }
        for record in history {
            writeln!(
                self.output,
                "{} weighing {:.2} kg",
                record.species_name, record.weight
            )?;
        }
        Ok(())
    }

    fn show_status(&mut self) -> io::Result<()> {
        let session = &self.session;
        let lake = session.active_location().map_or("-", |l| l.name.as_str());
        let bait = session.active_lure().map_or("-", |l| l.name.as_str());
        writeln!(
            self.output,
            "Mode: {} | Lake: {} | Bait: {} | Coins: {:.2} | Fish held: {}",
            session.mode(),
            lake,
            bait,
            session.balance(),
            session.catch_history().len()
        )?;
        if let Some(remaining) = session.time_until_decay() {
            writeln!(
                self.output,
                "Next {} coin charge in {}s",
                session.config().decay_amount,
                remaining.num_seconds()
            )?;
        }
        Ok(())
    }

    fn report_sale(&mut self, total: f64) -> io::Result<()> {
        writeln!(
            self.output,
            "Sold all fish for {:.2} coins. Total coins: {:.2}",
            total,
            self.session.balance()
        )
    }

    fn report_decay(&mut self) -> io::Result<()> {
        for event in self.session.drain_decay_events() {
            writeln!(
                self.output,
                "Time passed. {:.0} coins deducted. Current coins: {:.2}",
                event.deducted, event.balance_after
            )?;
        }
        Ok(())
    }

    /// Writes `text`, flushes, and reads one line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
