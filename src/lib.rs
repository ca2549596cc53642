//! Angler - Turn-Based Terminal Fishing Game Library
//!
//! This module exposes the catch engine, session state machine, and catalogs
//! for testing and for the terminal front end.

pub mod catalog;
pub mod cli;
pub mod core;
pub mod fishing;
pub mod session;

pub use catalog::Catalog;
pub use fishing::{CatchRecord, Outcome};
pub use session::{Mode, Session, SessionError, TerminationStatus};
