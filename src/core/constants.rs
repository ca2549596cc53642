// Economy
pub const STARTING_BALANCE: f64 = 10.0;
pub const MIN_BALANCE_TO_CONTINUE: f64 = 10.0;

// Fixed-count mode
pub const MAX_FISH: usize = 10;

// Timed mode decay
pub const DECAY_AMOUNT: f64 = 10.0;
pub const DECAY_INTERVAL_SECONDS: i64 = 60;

// Catch engine
pub const MAX_CATCH_CHANCE: f64 = 0.98;

// Catalog data files (relative to the data directory)
pub const FISH_DATA_FILE: &str = "fish_data.json";
pub const LAKE_DATA_FILE: &str = "lake_data.json";
pub const BAIT_DATA_FILE: &str = "bait_data.json";
