//! Line-based terminal front end.

pub mod commands;
pub mod runner;

pub use commands::{parse_command, parse_yes_no, Command};
pub use runner::{GameRunner, GameSummary};
