//! Building-subsystem error type.

use thiserror::Error;

use lift_core::{ConfigError, Floor};

/// Errors produced by `lift-building`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildingError {
    #[error("{floor} is outside floors 0..{floors}")]
    OutOfRange { floor: Floor, floors: u32 },

    #[error("hall calls need a direction (up or down)")]
    NoDirection,

    #[error("invalid building: {0}")]
    Config(#[from] ConfigError),
}

pub type BuildingResult<T> = Result<T, BuildingError>;
