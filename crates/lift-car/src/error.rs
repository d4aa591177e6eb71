use lift_core::{ElevatorId, Floor};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarError {
    #[error("{car}: floor {floor} is outside 0..{floors}")]
    OutOfRange {
        car:    ElevatorId,
        floor:  Floor,
        floors: u32,
    },
}

pub type CarResult<T> = Result<T, CarError>;
