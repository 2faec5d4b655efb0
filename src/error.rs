// Session configuration errors: everything that can be rejected before a
// race starts. The running simulation itself has no failure modes.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GameError {
    #[error("unknown map theme '{0}' (expected snow, storm or desert)")]
    UnknownTheme(String),
    #[error("vehicle index {index} out of range (0..{available})")]
    InvalidVehicle { index: usize, available: usize },
    #[error("track length must be positive, got {0}")]
    TrackTooShort(f64),
}
