//! Catch records and attempt outcomes.

use serde::{Deserialize, Serialize};

/// A landed fish in the player's catch history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchRecord {
    pub species_name: String,
    /// Weight in kg; one kg sells for one coin
    pub weight: f64,
}

/// Result of a single cast.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The fish was landed
    Caught { species: String, weight: f64 },
    /// The fish got away. Which species bit is not revealed.
    Missed,
}

impl Outcome {
    pub fn is_caught(&self) -> bool {
        matches!(self, Outcome::Caught { .. })
    }
}
