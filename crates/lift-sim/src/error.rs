use lift_building::BuildingError;
use lift_car::CarError;
use lift_core::{ConfigError, ElevatorId, Floor};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid engine configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// A floor outside the building, a trip that goes nowhere, or a hall
    /// call without a direction.
    #[error("invalid floor {floor} for a {floors}-floor building: {reason}")]
    OutOfRange {
        floor:  Floor,
        floors: u32,
        reason: &'static str,
    },

    #[error("no elevator {0}")]
    UnknownCar(ElevatorId),

    #[error("engine is shut down")]
    Closed,

    #[error("another tick is already running")]
    TickInProgress,
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<BuildingError> for EngineError {
    fn from(e: BuildingError) -> Self {
        match e {
            BuildingError::OutOfRange { floor, floors } => {
                EngineError::OutOfRange { floor, floors, reason: "outside the building" }
            }
            BuildingError::NoDirection => EngineError::OutOfRange {
                floor:  Floor::INVALID,
                floors: 0,
                reason: "a hall call needs a direction",
            },
            BuildingError::Config(c) => EngineError::InvalidConfiguration(c),
        }
    }
}

impl From<CarError> for EngineError {
    fn from(e: CarError) -> Self {
        match e {
            CarError::OutOfRange { floor, floors, .. } => {
                EngineError::OutOfRange { floor, floors, reason: "outside the building" }
            }
        }
    }
}
