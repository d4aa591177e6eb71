//! Static building topology.

use lift_core::{ConfigError, EngineConfig, Floor};

use crate::{BuildingError, BuildingResult};

/// The shaft every car runs in: floors `0..floors`, uniform storey height.
///
/// Immutable after construction.  Cheap to copy into snapshots.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    floors:         u32,
    floor_height_m: f64,
}

impl Building {
    /// Create a building with `floors` storeys of `floor_height_m` metres.
    pub fn new(floors: u32, floor_height_m: f64) -> BuildingResult<Self> {
        if floors < 2 {
            return Err(ConfigError::TooFewFloors(floors).into());
        }
        if !(floor_height_m.is_finite() && floor_height_m > 0.0) {
            return Err(ConfigError::BadFloorHeight(floor_height_m).into());
        }
        Ok(Self { floors, floor_height_m })
    }

    /// Building described by an engine configuration.
    pub fn from_config(config: &EngineConfig) -> BuildingResult<Self> {
        Self::new(config.floors, config.floor_height_m)
    }

    #[inline]
    pub fn floors(&self) -> u32 {
        self.floors
    }

    #[inline]
    pub fn floor_height_m(&self) -> f64 {
        self.floor_height_m
    }

    #[inline]
    pub fn top_floor(&self) -> Floor {
        Floor(self.floors - 1)
    }

    #[inline]
    pub fn contains(&self, floor: Floor) -> bool {
        floor.0 < self.floors
    }

    /// Return `floor` unchanged if it exists, else `OutOfRange`.
    pub fn check(&self, floor: Floor) -> BuildingResult<Floor> {
        if self.contains(floor) {
            Ok(floor)
        } else {
            Err(BuildingError::OutOfRange { floor, floors: self.floors })
        }
    }

    /// Vertical distance between two floors in metres.
    #[inline]
    pub fn distance_m(&self, a: Floor, b: Floor) -> f64 {
        a.distance(b) as f64 * self.floor_height_m
    }

    /// All floors, ground first.
    pub fn iter_floors(&self) -> impl Iterator<Item = Floor> + use<> {
        (0..self.floors).map(Floor)
    }
}
