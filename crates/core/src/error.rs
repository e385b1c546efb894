//! Validation failures and terminal game signals.
//!
//! A [`ValidationError`] means the attempted construction or mutation was
//! rejected and nothing changed. A [`GameOver`] ends the session and unwinds
//! to the driver.

use thiserror::Error;

use crate::types::{DeathCause, RunOutcome};

/// Rejected construction or mutation of a game entity.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{entity} name cannot be empty")]
    EmptyName { entity: &'static str },

    #[error("{stat} cannot be negative (got {value})")]
    Negative { stat: &'static str, value: i32 },

    #[error("{stat} must be positive (got {value})")]
    NotPositive { stat: &'static str, value: i32 },

    #[error("health {health} cannot be greater than base health {base_health}")]
    HealthAboveBase { health: i32, base_health: i32 },

    #[error("defence must be a percentage in 0..=100 (got {0})")]
    DefenceOutOfRange(i32),

    #[error("equipment holds {len} items but its size is {size}")]
    EquipmentOverCapacity { len: usize, size: usize },

    #[error("statistic {stat} cannot be greater than base statistic {base}")]
    StatAboveBase { stat: i32, base: i32 },

    #[error("given location was empty")]
    EmptyLocation,

    #[error("given matrix wasn't a rectangle (row {row} has {len} fields, expected {expected})")]
    DeformedLocation { row: usize, len: usize, expected: usize },

    #[error("location of level {0} has no starting point")]
    StartingPointNotFound(u32),

    #[error("coordinates ({x}, {y}) are out of range for a {width}x{height} location")]
    InvalidCoordinates { x: usize, y: usize, width: usize, height: usize },

    #[error("level {level} is outside the discovered locations (1..={discovered})")]
    InvalidLevel { level: u32, discovered: usize },

    #[error("a game needs at least one location")]
    NoLocations,
}

/// Terminal signal raised when the player wins or dies.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameOver {
    #[error("You Won! Congratulations :O")]
    Victory,

    #[error("Game Over :( {0}")]
    Defeat(DeathCause),
}

impl GameOver {
    pub fn outcome(&self) -> RunOutcome {
        match self {
            Self::Victory => RunOutcome::Victory,
            Self::Defeat(cause) => RunOutcome::Defeat(cause.clone()),
        }
    }
}
