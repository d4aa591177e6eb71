//! Configuration validation errors.
//!
//! Sub-crates define their own error enums and wrap `ConfigError` as one
//! variant via `#[from]` where construction can fail.

use thiserror::Error;

/// Why an [`EngineConfig`][crate::EngineConfig] was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("building needs at least 2 floors, got {0}")]
    TooFewFloors(u32),

    #[error("at least one elevator is required")]
    NoElevators,

    #[error("elevator capacity must be at least 1")]
    ZeroCapacity,

    #[error("tick duration must be at least 1 second")]
    ZeroTickDuration,

    #[error("floor height must be a positive number of metres, got {0}")]
    BadFloorHeight(f64),

    #[error("start floor {start} is outside 0..{floors}")]
    StartFloorOutOfRange { start: u32, floors: u32 },
}

/// Shorthand result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;
