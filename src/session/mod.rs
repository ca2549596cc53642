//! Session state machine: mode, location and lure, catch history, balance,
//! and the mode-specific termination rules.

pub mod error;
pub mod logic;
pub mod types;

pub use error::{CatalogKind, Precondition, SessionError};
pub use logic::Session;
pub use types::*;
