//! The catch engine.
//!
//! One attempt is two independent draws:
//! 1. **Selection** - which species bites, weighted by
//!    `base_catch_rate * catch_rate_modifier` across the location's stock
//! 2. **Capture** - whether it is landed, with probability
//!    `min(base_catch_rate * catch_rate_modifier, cap)` for the drawn species
//!
//! The engine holds no state; all randomness comes from the caller's rng.

use super::types::Outcome;
use crate::catalog::{Location, Lure, Species};
use crate::core::constants::MAX_CATCH_CHANCE;
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatchError {
    /// No species at the location has a positive selection weight
    #[error("no fish at {location} can bite with this lure")]
    DegenerateDistribution { location: String },
}

/// Unnormalized selection weight of a species under a lure.
pub fn selection_weight(species: &Species, lure: &Lure) -> f64 {
    species.base_catch_rate * lure.catch_rate_modifier
}

/// Probability of landing `species` once it bites, capped at `cap`.
pub fn catch_chance(species: &Species, lure: &Lure, cap: f64) -> f64 {
    selection_weight(species, lure).min(cap)
}

/// Draws the species that bites.
///
/// Species with zero weight can never be drawn. Fails when the weights sum to
/// zero (or to something that is not a finite positive number).
pub fn select_species<'a>(
    location: &'a Location,
    lure: &Lure,
    rng: &mut impl Rng,
) -> Result<&'a Arc<Species>, CatchError> {
    let weights: Vec<f64> = location
        .species
        .iter()
        .map(|s| selection_weight(s, lure).max(0.0))
        .collect();
    let total: f64 = weights.iter().sum();

    if !(total > 0.0 && total.is_finite()) {
        return Err(CatchError::DegenerateDistribution {
            location: location.name.clone(),
        });
    }

    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (species, weight) in location.species.iter().zip(&weights) {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight / total;
        last_positive = Some(species);
        if roll < cumulative {
            return Ok(species);
        }
    }

    // Rounding can leave the cumulative sum a hair under 1.0
    last_positive.ok_or_else(|| CatchError::DegenerateDistribution {
        location: location.name.clone(),
    })
}

/// Resolves one cast with the standard 0.98 catch cap.
pub fn attempt(location: &Location, lure: &Lure, rng: &mut impl Rng) -> Result<Outcome, CatchError> {
    attempt_with_cap(location, lure, MAX_CATCH_CHANCE, rng)
}

/// Resolves one cast with a custom cap on the catch probability.
pub fn attempt_with_cap(
    location: &Location,
    lure: &Lure,
    cap: f64,
    rng: &mut impl Rng,
) -> Result<Outcome, CatchError> {
    let species = select_species(location, lure, rng)?;
    let chance = catch_chance(species, lure, cap);

    if rng.gen::<f64>() < chance {
        Ok(Outcome::Caught {
            species: species.name.clone(),
            weight: species.sample_weight(rng),
        })
    } else {
        Ok(Outcome::Missed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn lake_of(species: Vec<Species>) -> Location {
        Location::new("Test Lake", species.into_iter().map(Arc::new).collect())
    }

    #[test]
    fn test_catch_chance_is_capped() {
        let perch = Species::new("Perch", 0.2, 1.5, 0.7);
        let minnow = Lure::new("Live Minnow", 1.5);
        assert_eq!(catch_chance(&perch, &minnow, MAX_CATCH_CHANCE), 0.98);

        let worm = Lure::new("Worm", 1.0);
        assert!((catch_chance(&perch, &worm, MAX_CATCH_CHANCE) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weight_species_never_selected() {
        let mut rng = create_test_rng();
        let lake = lake_of(vec![
            Species::new("Ghost", 1.0, 2.0, 0.0),
            Species::new("Carp", 1.0, 5.0, 0.5),
        ]);
        let worm = Lure::new("Worm", 1.0);

        for _ in 0..1000 {
            let picked = select_species(&lake, &worm, &mut rng).unwrap();
            assert_eq!(picked.name, "Carp");
        }
    }

    #[test]
    fn test_all_zero_weights_is_degenerate() {
        let mut rng = create_test_rng();
        let lake = lake_of(vec![Species::new("Ghost", 1.0, 2.0, 0.0)]);
        let worm = Lure::new("Worm", 1.0);

        let err = attempt(&lake, &worm, &mut rng).unwrap_err();
        assert_eq!(
            err,
            CatchError::DegenerateDistribution {
                location: "Test Lake".to_string()
            }
        );
    }

    #[test]
    fn test_empty_location_is_degenerate() {
        let mut rng = create_test_rng();
        let lake = lake_of(vec![]);
        let worm = Lure::new("Worm", 1.0);
        assert!(attempt(&lake, &worm, &mut rng).is_err());
    }

    #[test]
    fn test_selection_follows_relative_weights() {
        let mut rng = create_test_rng();
        // Weights 0.6 : 0.2 -> Perch drawn ~75% of the time
        let lake = lake_of(vec![
            Species::new("Perch", 0.2, 1.5, 0.6),
            Species::new("Pike", 2.0, 9.0, 0.2),
        ]);
        let spinner = Lure::new("Spinner", 1.2);
        let iterations = 20_000;

        let perch_count = (0..iterations)
            .filter(|_| select_species(&lake, &spinner, &mut rng).unwrap().name == "Perch")
            .count();
        let ratio = perch_count as f64 / iterations as f64;

        assert!(
            (ratio - 0.75).abs() < 0.02,
            "Perch selection ratio {} should be near 0.75",
            ratio
        );
    }

    #[test]
    fn test_miss_carries_no_species() {
        let mut rng = create_test_rng();
        let lake = lake_of(vec![Species::new("Sturgeon", 10.0, 60.0, 0.05)]);
        let worm = Lure::new("Worm", 1.0);

        let mut saw_miss = false;
        for _ in 0..100 {
            if attempt(&lake, &worm, &mut rng).unwrap() == Outcome::Missed {
                saw_miss = true;
                break;
            }
        }
        assert!(saw_miss, "A 5% fish should get away within 100 casts");
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let lake = lake_of(vec![
            Species::new("Carp", 1.0, 5.0, 0.5),
            Species::new("Pike", 2.0, 9.0, 0.25),
        ]);
        let worm = Lure::new("Worm", 1.0);

        let mut rng_a = ChaCha8Rng::seed_from_u64(99999);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99999);
        for _ in 0..50 {
            assert_eq!(
                attempt(&lake, &worm, &mut rng_a).unwrap(),
                attempt(&lake, &worm, &mut rng_b).unwrap()
            );
        }
    }
}
