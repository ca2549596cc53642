//! Fishing system: catch records and the catch engine.

pub mod engine;
pub mod types;

pub use engine::*;
pub use types::*;
