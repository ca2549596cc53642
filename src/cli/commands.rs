//! Player command parsing.

use crate::session::SellDecision;

/// Commands accepted at the main fishing prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Cast,
    /// Optional bait name given inline (`change bait Worm`)
    ChangeBait(Option<String>),
    /// Optional lake name given inline (`change location Misty Pond`)
    ChangeLocation(Option<String>),
    ShowCatch,
    SellFish,
    Status,
    Help,
    Quit,
    Unknown(String),
}

pub const COMMAND_PROMPT: &str =
    "Enter command (cast, change bait, change location, show catch, sell fish, status, help, quit): ";

pub const HELP_TEXT: &str = "\
Commands:
  cast                    Cast your line at the current lake
  change bait [NAME]      Switch to another bait
  change location [NAME]  Move to another lake
  show catch              List the fish you are holding
  sell fish               Sell every fish you hold (1 coin per kg)
  status                  Show mode, lake, bait, coins and timer
  quit                    End the game";

fn inline_arg(rest: &str) -> Option<String> {
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Parses a command line. Keywords are case-insensitive; inline names keep
/// their case since catalog lookups are exact.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    // ASCII lowering keeps byte offsets aligned with `trimmed`
    let lower = trimmed.to_ascii_lowercase();

    if let Some(idx) = ["change bait", "change lure"]
        .iter()
        .find(|p| lower.starts_with(*p))
        .map(|p| p.len())
    {
        return Command::ChangeBait(inline_arg(&trimmed[idx..]));
    }
    if let Some(idx) = ["change location", "change lake"]
        .iter()
        .find(|p| lower.starts_with(*p))
        .map(|p| p.len())
    {
        return Command::ChangeLocation(inline_arg(&trimmed[idx..]));
    }

    match lower.as_str() {
        "cast" | "c" => Command::Cast,
        "show catch" | "catch" => Command::ShowCatch,
        "sell fish" | "sell" => Command::SellFish,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Parses a yes/no answer. Anything else is `None` so the caller re-asks.
pub fn parse_yes_no(line: &str) -> Option<SellDecision> {
    match line.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(SellDecision::Sell),
        "no" | "n" => Some(SellDecision::Decline),
        _ => None,
    }
}
