//! Species, lure, and location catalogs.
//!
//! A [`Catalog`] is built once at startup, either from the JSON data files
//! (see [`loader`]) or from the built-in lakes and baits, and is read-only
//! afterwards.

pub mod builtin;
pub mod loader;
pub mod types;

pub use loader::{load_catalog, BaitRecord, CatalogError, FishRecord, LakeRecord};
pub use types::{Location, Lure, Species};

use std::sync::Arc;

/// Every species, location, and lure available to a session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    species: Vec<Arc<Species>>,
    locations: Vec<Arc<Location>>,
    lures: Vec<Arc<Lure>>,
}

impl Catalog {
    /// Assembles a catalog from already validated parts.
    pub fn new(species: Vec<Arc<Species>>, locations: Vec<Arc<Location>>, lures: Vec<Arc<Lure>>) -> Self {
        Self {
            species,
            locations,
            lures,
        }
    }

    pub fn species(&self, name: &str) -> Option<Arc<Species>> {
        self.species.iter().find(|s| s.name == name).cloned()
    }

    pub fn location(&self, name: &str) -> Option<Arc<Location>> {
        self.locations.iter().find(|l| l.name == name).cloned()
    }

    pub fn lure(&self, name: &str) -> Option<Arc<Lure>> {
        self.lures.iter().find(|l| l.name == name).cloned()
    }

    pub fn all_species(&self) -> &[Arc<Species>] {
        &self.species
    }

    pub fn locations(&self) -> &[Arc<Location>] {
        &self.locations
    }

    pub fn lures(&self) -> &[Arc<Lure>] {
        &self.lures
    }
}
