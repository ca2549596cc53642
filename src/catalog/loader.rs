//! Loads the catalog from `fish_data.json`, `lake_data.json`, and
//! `bait_data.json`.
//!
//! Records are validated here so the catch engine and session can assume a
//! consistent catalog: every lake stocks at least one known species, weights
//! are positive and ordered, rates are in range, and names are unique.

use super::types::{Location, Lure, Species};
use super::Catalog;
use crate::core::constants::{BAIT_DATA_FILE, FISH_DATA_FILE, LAKE_DATA_FILE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when loading catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File is not valid JSON for its record type
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Two records of the same kind share a name
    #[error("duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },
    /// A record has an out-of-range field
    #[error("invalid {kind} '{name}': {reason}")]
    InvalidRecord {
        kind: &'static str,
        name: String,
        reason: String,
    },
    /// A lake lists a fish that is not in the species data
    #[error("lake '{lake}' stocks unknown fish '{fish}'")]
    UnknownSpecies { lake: String, fish: String },
}

/// One entry of `fish_data.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishRecord {
    pub name: String,
    pub weight_min: f64,
    pub weight_max: f64,
    pub catch_rate: f64,
}

/// One entry of `lake_data.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LakeRecord {
    pub name: String,
    pub fish_types: Vec<String>,
}

/// One entry of `bait_data.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaitRecord {
    pub name: String,
    pub catch_rate_modifier: f64,
}

/// Reads and validates the three data files in `data_dir`.
pub fn load_catalog(data_dir: &Path) -> Result<Catalog, CatalogError> {
    let fish: Vec<FishRecord> = read_records(&data_dir.join(FISH_DATA_FILE))?;
    let lakes: Vec<LakeRecord> = read_records(&data_dir.join(LAKE_DATA_FILE))?;
    let baits: Vec<BaitRecord> = read_records(&data_dir.join(BAIT_DATA_FILE))?;

    let catalog = Catalog::from_records(fish, lakes, baits)?;
    tracing::debug!(
        species = catalog.all_species().len(),
        locations = catalog.locations().len(),
        lures = catalog.lures().len(),
        dir = %data_dir.display(),
        "loaded catalog"
    );
    Ok(catalog)
}

fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn check_unique<'a>(kind: &'static str, names: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(CatalogError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn invalid(kind: &'static str, name: &str, reason: impl Into<String>) -> CatalogError {
    CatalogError::InvalidRecord {
        kind,
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn validate_fish(record: &FishRecord) -> Result<(), CatalogError> {
    if !(record.weight_min > 0.0 && record.weight_max > 0.0) {
        return Err(invalid("fish", &record.name, "weights must be positive"));
    }
    if record.weight_min > record.weight_max {
        return Err(invalid("fish", &record.name, "weight_min exceeds weight_max"));
    }
    if !(record.catch_rate > 0.0 && record.catch_rate <= 1.0) {
        return Err(invalid("fish", &record.name, "catch_rate must be in (0, 1]"));
    }
    Ok(())
}

impl Catalog {
    /// Builds a catalog from raw records, validating every field and
    /// resolving lake stock lists against the fish records.
    pub fn from_records(
        fish: Vec<FishRecord>,
        lakes: Vec<LakeRecord>,
        baits: Vec<BaitRecord>,
    ) -> Result<Self, CatalogError> {
        check_unique("fish", fish.iter().map(|f| f.name.as_str()))?;
        check_unique("lake", lakes.iter().map(|l| l.name.as_str()))?;
        check_unique("bait", baits.iter().map(|b| b.name.as_str()))?;

        let mut species = Vec::with_capacity(fish.len());
        for record in fish {
            validate_fish(&record)?;
            species.push(Arc::new(Species::new(
                record.name,
                record.weight_min,
                record.weight_max,
                record.catch_rate,
            )));
        }

        let mut locations = Vec::with_capacity(lakes.len());
        for record in lakes {
            if record.fish_types.is_empty() {
                return Err(invalid("lake", &record.name, "stocks no fish"));
            }
            let mut stocked: Vec<Arc<Species>> = Vec::with_capacity(record.fish_types.len());
            for fish_name in &record.fish_types {
                let found = species
                    .iter()
                    .find(|s| &s.name == fish_name)
                    .ok_or_else(|| CatalogError::UnknownSpecies {
                        lake: record.name.clone(),
                        fish: fish_name.clone(),
                    })?;
                // A lake listing the same fish twice still stocks it once.
                if !stocked.iter().any(|s| Arc::ptr_eq(s, found)) {
                    stocked.push(found.clone());
                }
            }
            locations.push(Arc::new(Location::new(record.name, stocked)));
        }

        let mut lures = Vec::with_capacity(baits.len());
        for record in baits {
            if !(record.catch_rate_modifier > 0.0 && record.catch_rate_modifier.is_finite()) {
                return Err(invalid("bait", &record.name, "catch_rate_modifier must be positive"));
            }
            lures.push(Arc::new(Lure::new(record.name, record.catch_rate_modifier)));
        }

        Ok(Self::new(species, locations, lures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fish(name: &str, min: f64, max: f64, rate: f64) -> FishRecord {
        FishRecord {
            name: name.to_string(),
            weight_min: min,
            weight_max: max,
            catch_rate: rate,
        }
    }

    fn lake(name: &str, fish_types: &[&str]) -> LakeRecord {
        LakeRecord {
            name: name.to_string(),
            fish_types: fish_types.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn bait(name: &str, modifier: f64) -> BaitRecord {
        BaitRecord {
            name: name.to_string(),
            catch_rate_modifier: modifier,
        }
    }

    #[test]
    fn test_from_records_resolves_lake_species_in_listed_order() {
        let catalog = Catalog::from_records(
            vec![fish("Carp", 1.0, 5.0, 0.5), fish("Pike", 2.0, 9.0, 0.2)],
            vec![lake("Misty Pond", &["Pike", "Carp"])],
            vec![bait("Worm", 1.0)],
        )
        .expect("valid records");

        let pond = catalog.location("Misty Pond").unwrap();
        let names: Vec<&str> = pond.species.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Pike", "Carp"]);
    }

    #[test]
    fn test_duplicate_stock_entry_collapses() {
        let catalog = Catalog::from_records(
            vec![fish("Carp", 1.0, 5.0, 0.5)],
            vec![lake("Misty Pond", &["Carp", "Carp"])],
            vec![bait("Worm", 1.0)],
        )
        .unwrap();
        assert_eq!(catalog.location("Misty Pond").unwrap().species.len(), 1);
    }

    #[test]
    fn test_unknown_species_rejected() {
        let err = Catalog::from_records(
            vec![fish("Carp", 1.0, 5.0, 0.5)],
            vec![lake("Misty Pond", &["Carp", "Kraken"])],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownSpecies { ref fish, .. } if fish == "Kraken"
        ));
    }

    #[test]
    fn test_empty_lake_rejected() {
        let err = Catalog::from_records(vec![fish("Carp", 1.0, 5.0, 0.5)], vec![lake("Dry Bed", &[])], vec![])
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { kind: "lake", .. }));
    }

    #[test]
    fn test_bad_fish_fields_rejected() {
        for record in [
            fish("Inverted", 5.0, 1.0, 0.5),
            fish("Weightless", 0.0, 1.0, 0.5),
            fish("Impossible", 1.0, 2.0, 0.0),
            fish("Certain", 1.0, 2.0, 1.5),
        ] {
            let err = Catalog::from_records(vec![record], vec![], vec![]).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidRecord { kind: "fish", .. }));
        }
    }

    #[test]
    fn test_non_positive_bait_rejected() {
        let err = Catalog::from_records(vec![], vec![], vec![bait("Rock", 0.0)]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { kind: "bait", .. }));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Catalog::from_records(
            vec![],
            vec![],
            vec![bait("Worm", 1.0), bait("Worm", 1.2)],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { kind: "bait", .. }));
    }
}
