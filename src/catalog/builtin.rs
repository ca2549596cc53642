//! Built-in lakes, fish, and baits used when no data directory is given.

use super::types::{Location, Lure, Species};
use super::Catalog;
use std::sync::Arc;

/// Built-in fish: (name, weight_min kg, weight_max kg, catch_rate).
pub const BUILTIN_FISH: [(&str, f64, f64, f64); 8] = [
    ("Perch", 0.2, 1.5, 0.7),
    ("Carp", 1.0, 5.0, 0.5),
    ("Trout", 0.5, 3.0, 0.45),
    ("Bass", 0.8, 4.5, 0.4),
    ("Catfish", 2.0, 15.0, 0.3),
    ("Pike", 2.0, 9.0, 0.25),
    ("Salmon", 3.0, 12.0, 0.2),
    ("Sturgeon", 10.0, 60.0, 0.05),
];

/// Built-in lakes and the fish they stock.
pub const BUILTIN_LAKES: [(&str, &[&str]); 4] = [
    ("Crystal Lake", &["Perch", "Carp", "Trout", "Pike"]),
    ("Misty Pond", &["Perch", "Carp", "Catfish"]),
    ("Rushing Creek", &["Trout", "Bass", "Salmon"]),
    ("Abyssal Rift", &["Catfish", "Pike", "Sturgeon"]),
];

/// Built-in baits: (name, catch_rate_modifier).
pub const BUILTIN_BAITS: [(&str, f64); 4] = [
    ("Worm", 1.0),
    ("Spinner", 1.2),
    ("Fly", 1.1),
    ("Live Minnow", 1.5),
];

/// The catalog shipped with the game.
pub fn builtin_catalog() -> Catalog {
    let species: Vec<Arc<Species>> = BUILTIN_FISH
        .iter()
        .map(|&(name, min, max, rate)| Arc::new(Species::new(name, min, max, rate)))
        .collect();

    let locations = BUILTIN_LAKES
        .iter()
        .map(|&(name, stock)| {
            let stocked = stock
                .iter()
                .filter_map(|fish| species.iter().find(|s| s.name == *fish).cloned())
                .collect();
            Arc::new(Location::new(name, stocked))
        })
        .collect();

    let lures = BUILTIN_BAITS
        .iter()
        .map(|&(name, modifier)| Arc::new(Lure::new(name, modifier)))
        .collect();

    Catalog::new(species, locations, lures)
}
