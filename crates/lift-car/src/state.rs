//! Car and door states, plus the events a car emits while stepping.

use lift_core::{Direction, Floor};

// ── CarState ──────────────────────────────────────────────────────────────────

/// Where a car is in its stop cycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarState {
    /// Doors closed, nothing queued.
    #[default]
    Idle,
    MovingUp,
    MovingDown,
    DoorsOpening,
    /// Passengers may alight and board.
    DoorsOpen,
    DoorsClosing,
}

impl CarState {
    /// The moving state for `direction`, or `Idle`.
    #[inline]
    pub fn moving(direction: Direction) -> CarState {
        match direction {
            Direction::Up   => CarState::MovingUp,
            Direction::Down => CarState::MovingDown,
            Direction::Idle => CarState::Idle,
        }
    }

    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, CarState::MovingUp | CarState::MovingDown)
    }

    pub fn door_state(self) -> DoorState {
        match self {
            CarState::DoorsOpening => DoorState::Opening,
            CarState::DoorsOpen    => DoorState::Open,
            CarState::DoorsClosing => DoorState::Closing,
            _                      => DoorState::Closed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CarState::Idle         => "idle",
            CarState::MovingUp     => "moving_up",
            CarState::MovingDown   => "moving_down",
            CarState::DoorsOpening => "doors_opening",
            CarState::DoorsOpen    => "doors_open",
            CarState::DoorsClosing => "doors_closing",
        }
    }
}

impl std::fmt::Display for CarState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DoorState ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

// ── CarEvent ──────────────────────────────────────────────────────────────────

/// Something observable a car did during one `Elevator::step`.
///
/// The engine tags these with the car id and tick before reporting them.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarEvent {
    StateChanged { from: CarState, to: CarState },
    /// Doors shut and the car left `floor` heading `direction`.
    Departed { floor: Floor, direction: Direction },
    /// One floor of travel.
    Moved { from: Floor, to: Floor },
    /// Reached a queued stop; doors start opening this tick.
    Arrived { floor: Floor },
}
