use super::types::{Mode, PendingReason};
use crate::fishing::CatchError;
use std::fmt;
use thiserror::Error;

/// Which catalog a failed lookup went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Location,
    Lure,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Location => write!(f, "lake"),
            CatalogKind::Lure => write!(f, "bait"),
        }
    }
}

/// A requirement a command needed that the session did not meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("choose a game mode first")]
    ModeNotChosen,
    #[error("you need to select a lake first")]
    MissingLocation,
    #[error("you need to select a bait first")]
    MissingLure,
}

/// Errors returned by session commands
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// Unknown location or lure name
    #[error("{kind} not found: {name}")]
    NotFound { kind: CatalogKind, name: String },
    #[error(transparent)]
    PreconditionFailed(#[from] Precondition),
    /// Propagated from the catch engine
    #[error(transparent)]
    Catch(#[from] CatchError),
    #[error("the session has ended")]
    SessionTerminated,
    #[error("invalid game mode '{0}', choose either '10fish' or 'timed'")]
    InvalidMode(String),
    #[error("game mode is already {0}")]
    ModeAlreadySet(Mode),
    /// A sell decision must be resolved before anything else changes
    #[error("waiting for a sell decision ({0})")]
    DecisionPending(PendingReason),
    #[error("no sell decision is pending")]
    NoPendingDecision,
}
