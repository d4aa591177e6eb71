//! Travel direction shared by cars, calls, and requests.

use crate::Floor;

/// Which way a car is heading, or which way a passenger wants to go.
///
/// `Idle` only applies to cars; a request always has `Up` or `Down`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    /// Car has nowhere to go.
    #[default]
    Idle,
}

impl Direction {
    /// Direction of travel from `from` to `to`; `Idle` when they are equal.
    #[inline]
    pub fn between(from: Floor, to: Floor) -> Direction {
        match from.0.cmp(&to.0) {
            std::cmp::Ordering::Less    => Direction::Up,
            std::cmp::Ordering::Greater => Direction::Down,
            std::cmp::Ordering::Equal   => Direction::Idle,
        }
    }

    /// `Up` ↔ `Down`; `Idle` stays `Idle`.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up   => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }

    /// `+1`, `-1`, or `0` — the per-tick floor delta for a car moving this way.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Up   => 1,
            Direction::Down => -1,
            Direction::Idle => 0,
        }
    }

    #[inline]
    pub fn is_moving(self) -> bool {
        !matches!(self, Direction::Idle)
    }

    /// `true` if `target` lies strictly ahead of `from` when travelling this way.
    #[inline]
    pub fn is_ahead(self, from: Floor, target: Floor) -> bool {
        match self {
            Direction::Up   => target.0 > from.0,
            Direction::Down => target.0 < from.0,
            Direction::Idle => false,
        }
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up   => "up",
            Direction::Down => "down",
            Direction::Idle => "idle",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
