//! Engine configuration.
//!
//! Produced by the application (or an external file loader with the `serde`
//! feature), validated once by the engine builder, and immutable afterwards.

use crate::{ConfigError, ConfigResult, Floor, SimClock, Tick};

// ── DispatchPolicyKind ────────────────────────────────────────────────────────

/// Which built-in dispatch policy the engine runs.
///
/// Custom policies bypass this enum entirely via
/// `EngineBuilder::with_policy`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DispatchPolicyKind {
    /// Closest car already heading toward the caller, then idle cars.
    #[default]
    NearestCar,
    /// Estimated floors travelled along each car's current sweep.
    Scan,
    /// First car (lowest id) with room; stops served in arrival order.
    FirstCome,
}

impl DispatchPolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchPolicyKind::NearestCar => "nearest_car",
            DispatchPolicyKind::Scan       => "scan",
            DispatchPolicyKind::FirstCome  => "first_come",
        }
    }
}

impl std::fmt::Display for DispatchPolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DispatchPolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest_car" | "nearest" => Ok(DispatchPolicyKind::NearestCar),
            "scan"                    => Ok(DispatchPolicyKind::Scan),
            "first_come" | "fcfs"     => Ok(DispatchPolicyKind::FirstCome),
            other                     => Err(format!("unknown dispatch policy `{other}`")),
        }
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Number of floors, numbered `0..floors`.  Must be at least 2.
    pub floors: u32,

    /// Number of cars, numbered `0..elevators`.  Must be at least 1.
    pub elevators: u32,

    /// Passengers per car.  Must be at least 1.
    pub capacity_per_elevator: u32,

    /// Extra ticks the doors stay open after the tick they finish opening.
    pub door_dwell_ticks: u32,

    /// Built-in dispatch policy.
    pub dispatch_policy: DispatchPolicyKind,

    /// Simulated seconds per tick.  Default: 2.
    pub tick_duration_secs: u32,

    /// Storey height in metres.  Only used for distance reporting.
    pub floor_height_m: f64,

    /// Floor every car starts on.  Default: ground.
    pub start_floor: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            floors:                10,
            elevators:             2,
            capacity_per_elevator: 8,
            door_dwell_ticks:      2,
            dispatch_policy:       DispatchPolicyKind::NearestCar,
            tick_duration_secs:    2,
            floor_height_m:        3.5,
            start_floor:           0,
        }
    }
}

impl EngineConfig {
    /// Check every field bound.  The engine builder calls this; nothing else
    /// in the workspace re-validates.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.floors < 2 {
            return Err(ConfigError::TooFewFloors(self.floors));
        }
        if self.elevators == 0 {
            return Err(ConfigError::NoElevators);
        }
        if self.capacity_per_elevator == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.tick_duration_secs == 0 {
            return Err(ConfigError::ZeroTickDuration);
        }
        if !(self.floor_height_m.is_finite() && self.floor_height_m > 0.0) {
            return Err(ConfigError::BadFloorHeight(self.floor_height_m));
        }
        if self.start_floor >= self.floors {
            return Err(ConfigError::StartFloorOutOfRange {
                start:  self.start_floor,
                floors: self.floors,
            });
        }
        Ok(())
    }

    /// Ticks one full stop costs: opening, open, dwell, closing.
    #[inline]
    pub fn door_cycle_ticks(&self) -> u64 {
        self.door_dwell_ticks as u64 + 3
    }

    /// The highest floor number.
    #[inline]
    pub fn top_floor(&self) -> Floor {
        Floor(self.floors - 1)
    }

    #[inline]
    pub fn start_floor(&self) -> Floor {
        Floor(self.start_floor)
    }

    /// `true` if `floor` lies in `0..floors`.
    #[inline]
    pub fn contains(&self, floor: Floor) -> bool {
        floor.0 < self.floors
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }

    /// Lower bound on the tick a trip of `floors` floors can complete by,
    /// for a car already waiting at the origin when the request arrives.
    pub fn ideal_arrival(&self, request_time: Tick, floors: u32) -> Tick {
        request_time + floors as u64 + self.door_cycle_ticks()
    }
}
