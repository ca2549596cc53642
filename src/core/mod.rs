//! Rule constants, tunable game configuration, and the session clock.

pub mod clock;
pub mod config;
pub mod constants;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DecayPolicy, GameConfig};
pub use constants::*;
