//! `FloorQueues` — passengers standing at each landing.
//!
//! Each landing keeps two FIFO lines, one per travel direction.  A request id
//! enters a line exactly once when it becomes waiting and leaves exactly once
//! when it boards, is cancelled, or is withdrawn; the engine never re-adds an
//! id that has already left.

use std::collections::VecDeque;

use lift_core::{Direction, Floor, RequestId};

/// Waiting lines at every landing.  Indexed `[floor][0 = up, 1 = down]`.
#[derive(Clone, Debug, Default)]
pub struct FloorQueues {
    lines: Vec<[VecDeque<RequestId>; 2]>,
    total: usize,
}

#[inline]
fn line(direction: Direction) -> Option<usize> {
    match direction {
        Direction::Up   => Some(0),
        Direction::Down => Some(1),
        Direction::Idle => None,
    }
}

impl FloorQueues {
    pub fn new(floors: u32) -> Self {
        Self {
            lines: (0..floors).map(|_| [VecDeque::new(), VecDeque::new()]).collect(),
            total: 0,
        }
    }

    /// Put `request` at the back of the `direction` line at `floor`.
    ///
    /// Ignored for `Direction::Idle` or an unknown floor; callers validate
    /// both before a request ever reaches the queue.
    pub fn push(&mut self, floor: Floor, direction: Direction, request: RequestId) {
        let (Some(l), Some(pair)) = (line(direction), self.lines.get_mut(floor.index())) else {
            return;
        };
        debug_assert!(!pair[l].contains(&request), "{request} queued twice");
        pair[l].push_back(request);
        self.total += 1;
    }

    /// Remove `request` from whichever line at `floor` holds it.
    pub fn remove(&mut self, floor: Floor, request: RequestId) -> bool {
        let Some(pair) = self.lines.get_mut(floor.index()) else {
            return false;
        };
        for l in pair.iter_mut() {
            if let Some(pos) = l.iter().position(|&r| r == request) {
                l.remove(pos);
                self.total -= 1;
                return true;
            }
        }
        false
    }

    /// The `direction` line at `floor`, front of the line first.
    pub fn waiting(&self, floor: Floor, direction: Direction) -> impl Iterator<Item = RequestId> + '_ {
        let l = line(direction);
        self.lines
            .get(floor.index())
            .into_iter()
            .flat_map(move |pair| l.map(|l| pair[l].iter().copied()).into_iter().flatten())
    }

    /// Number of passengers in the `direction` line at `floor`.
    pub fn count(&self, floor: Floor, direction: Direction) -> usize {
        match (line(direction), self.lines.get(floor.index())) {
            (Some(l), Some(pair)) => pair[l].len(),
            _ => 0,
        }
    }

    /// Total passengers waiting anywhere in the building.
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
