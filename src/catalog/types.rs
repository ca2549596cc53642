//! Immutable catalog records: species, lures, and locations.

use rand::Rng;
use std::sync::Arc;

/// A fish type with a weight range and an intrinsic catch likelihood.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    /// Lightest possible catch in kg
    pub weight_min: f64,
    /// Heaviest possible catch in kg
    pub weight_max: f64,
    /// Chance of landing this fish with a neutral lure, in (0, 1]
    pub base_catch_rate: f64,
}

impl Species {
    pub fn new(name: impl Into<String>, weight_min: f64, weight_max: f64, base_catch_rate: f64) -> Self {
        Self {
            name: name.into(),
            weight_min,
            weight_max,
            base_catch_rate,
        }
    }

    /// Samples a catch weight uniformly from `[weight_min, weight_max]`.
    pub fn sample_weight(&self, rng: &mut impl Rng) -> f64 {
        if self.weight_min >= self.weight_max {
            return self.weight_min;
        }
        rng.gen_range(self.weight_min..=self.weight_max)
    }
}

/// A player-selectable bait that scales catch likelihood.
#[derive(Debug, Clone, PartialEq)]
pub struct Lure {
    pub name: String,
    pub catch_rate_modifier: f64,
}

impl Lure {
    pub fn new(name: impl Into<String>, catch_rate_modifier: f64) -> Self {
        Self {
            name: name.into(),
            catch_rate_modifier,
        }
    }
}

/// A named pool of species. Species are shared with the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub species: Vec<Arc<Species>>,
}

impl Location {
    pub fn new(name: impl Into<String>, species: Vec<Arc<Species>>) -> Self {
        Self {
            name: name.into(),
            species,
        }
    }

    pub fn stocks(&self, species_name: &str) -> bool {
        self.species.iter().any(|s| s.name == species_name)
    }
}
