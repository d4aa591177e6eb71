use thiserror::Error;

use lift_core::Floor;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DemandError {
    #[error("origin and destination are both {0}")]
    SameFloor(Floor),

    #[error("load profile error: {0}")]
    Profile(String),
}

pub type DemandResult<T> = Result<T, DemandError>;
