//! `StopQueue` — the floors a car has committed to visit.
//!
//! Two orderings are supported:
//!
//! - **Sweep** keeps the queue in elevator-algorithm order: every stop still
//!   ahead in the current direction (nearest first), then the stops behind
//!   (nearest first, i.e. in the order the return run reaches them).  The
//!   queue is re-sorted whenever a stop is added or the car changes direction.
//! - **Fifo** keeps stops in the order they were requested.
//!
//! In both orderings a floor is queued at most once, and a moving car serves
//! any queued floor it passes.

use std::collections::VecDeque;

use lift_core::{Direction, Floor};

/// How a car orders its queued stops.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopOrdering {
    #[default]
    Sweep,
    Fifo,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopQueue {
    ordering: StopOrdering,
    stops:    VecDeque<Floor>,
}

impl StopQueue {
    pub fn new(ordering: StopOrdering) -> Self {
        Self { ordering, stops: VecDeque::new() }
    }

    #[inline]
    pub fn ordering(&self) -> StopOrdering {
        self.ordering
    }

    /// Queue `floor`.  Returns `false` if it was already queued.
    ///
    /// `at` and `direction` are the car's current floor and heading; they
    /// only matter for sweep ordering.
    pub fn insert(&mut self, floor: Floor, at: Floor, direction: Direction) -> bool {
        if self.stops.contains(&floor) {
            return false;
        }
        self.stops.push_back(floor);
        self.reorder(at, direction);
        true
    }

    /// Drop `floor` from the queue.
    pub fn remove(&mut self, floor: Floor) -> bool {
        match self.stops.iter().position(|&s| s == floor) {
            Some(pos) => {
                self.stops.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Re-sort for a car at `at` heading `direction`.  No-op for FIFO.
    pub fn reorder(&mut self, at: Floor, direction: Direction) {
        if self.ordering == StopOrdering::Fifo {
            return;
        }
        self.stops
            .make_contiguous()
            .sort_by_key(|&s| sweep_key(s, at, direction));
    }

    /// Next stop the car should head for.
    #[inline]
    pub fn front(&self) -> Option<Floor> {
        self.stops.front().copied()
    }

    #[inline]
    pub fn contains(&self, floor: Floor) -> bool {
        self.stops.contains(&floor)
    }

    /// `true` if some queued stop lies strictly ahead of `at` heading `direction`.
    pub fn any_ahead(&self, at: Floor, direction: Direction) -> bool {
        self.stops.iter().any(|&s| direction.is_ahead(at, s))
    }

    /// Farthest queued stop ahead of `at` heading `direction`.
    pub fn last_ahead(&self, at: Floor, direction: Direction) -> Option<Floor> {
        self.stops
            .iter()
            .copied()
            .filter(|&s| direction.is_ahead(at, s))
            .max_by_key(|&s| at.distance(s))
    }

    pub fn iter(&self) -> impl Iterator<Item = Floor> + '_ {
        self.stops.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// `(behind, distance, floor)`: stops ahead sort before stops behind, then by
/// distance.  The floor breaks distance ties for an idle car (lower first).
/// A heading car treats its own floor as behind it: it finishes the run
/// before coming back.
fn sweep_key(stop: Floor, at: Floor, direction: Direction) -> (bool, u32, Floor) {
    let behind = direction.is_moving() && !direction.is_ahead(at, stop);
    (behind, at.distance(stop), stop)
}
