//! A single passenger journey and its timing record.

use lift_core::{Direction, ElevatorId, Floor, RequestId, Tick};

use crate::{DemandError, DemandResult};

/// Where a request is in its lifecycle.  See the crate docs for the diagram.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestStatus {
    /// Submitted for a future tick; not yet standing at the landing.
    Scheduled,
    /// Standing at the landing, no car assigned.
    Waiting,
    /// A car has been assigned; passenger still at the landing.
    Assigned,
    /// Inside a car.
    Boarded,
    /// Delivered.  Terminal.
    Arrived,
    /// Withdrawn before boarding.  Terminal.
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Scheduled => "scheduled",
            RequestStatus::Waiting   => "waiting",
            RequestStatus::Assigned  => "assigned",
            RequestStatus::Boarded   => "boarded",
            RequestStatus::Arrived   => "arrived",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// `true` once nothing can happen to the request any more.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Arrived | RequestStatus::Cancelled)
    }

    /// `true` while the passenger is still at the landing (or not there yet).
    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            RequestStatus::Scheduled | RequestStatus::Waiting | RequestStatus::Assigned
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One passenger travelling from `origin` to `destination`.
///
/// Timing fields are filled in as the request moves through its lifecycle.
/// All transition methods return `false` (and change nothing) when called
/// from the wrong state, so a stray call can never corrupt a finished record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    pub id:           RequestId,
    pub origin:       Floor,
    pub destination:  Floor,
    /// Tick the passenger reached the landing.
    pub request_time: Tick,
    /// Car that will pick the passenger up (and, once boarded, carries them).
    pub assigned:     Option<ElevatorId>,
    pub board_time:   Option<Tick>,
    pub arrival_time: Option<Tick>,
    pub status:       RequestStatus,
    /// Cancellation requested while a car was already on its way.  Applied at
    /// the next boarding opportunity.
    pub cancel_pending: bool,
}

impl Request {
    /// A request that starts `Scheduled`.  `origin` must differ from
    /// `destination`; floor range is checked by the engine.
    pub fn new(
        id:           RequestId,
        origin:       Floor,
        destination:  Floor,
        request_time: Tick,
    ) -> DemandResult<Self> {
        if origin == destination {
            return Err(DemandError::SameFloor(origin));
        }
        Ok(Self {
            id,
            origin,
            destination,
            request_time,
            assigned:       None,
            board_time:     None,
            arrival_time:   None,
            status:         RequestStatus::Scheduled,
            cancel_pending: false,
        })
    }

    /// Direction the passenger wants to travel.  Never `Idle`.
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::between(self.origin, self.destination)
    }

    /// Floors between origin and destination.
    #[inline]
    pub fn floors(&self) -> u32 {
        self.origin.distance(self.destination)
    }

    // ── Metrics ───────────────────────────────────────────────────────────

    /// Ticks spent waiting at the landing.
    pub fn wait_ticks(&self) -> Option<u64> {
        self.board_time.map(|b| b.since(self.request_time))
    }

    /// Ticks spent inside the car.
    pub fn travel_ticks(&self) -> Option<u64> {
        match (self.board_time, self.arrival_time) {
            (Some(b), Some(a)) => Some(a.since(b)),
            _ => None,
        }
    }

    /// Ticks from reaching the landing to stepping out at the destination.
    pub fn total_ticks(&self) -> Option<u64> {
        self.arrival_time.map(|a| a.since(self.request_time))
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// `Scheduled → Waiting`.
    pub fn release(&mut self) -> bool {
        if self.status != RequestStatus::Scheduled {
            return false;
        }
        self.status = RequestStatus::Waiting;
        true
    }

    /// `Waiting → Assigned`.
    pub fn assign(&mut self, car: ElevatorId) -> bool {
        if self.status != RequestStatus::Waiting {
            return false;
        }
        self.assigned = Some(car);
        self.status = RequestStatus::Assigned;
        true
    }

    /// `Assigned → Waiting` — the car could not take the passenger.
    pub fn unassign(&mut self) -> bool {
        if self.status != RequestStatus::Assigned {
            return false;
        }
        self.assigned = None;
        self.status = RequestStatus::Waiting;
        true
    }

    /// `Assigned → Boarded` at `now`.
    pub fn board(&mut self, now: Tick) -> bool {
        if self.status != RequestStatus::Assigned || self.cancel_pending {
            return false;
        }
        debug_assert!(self.request_time <= now);
        self.board_time = Some(now);
        self.status = RequestStatus::Boarded;
        true
    }

    /// `Boarded → Arrived` at `now`.
    pub fn arrive(&mut self, now: Tick) -> bool {
        if self.status != RequestStatus::Boarded {
            return false;
        }
        debug_assert!(self.board_time.is_some_and(|b| b <= now));
        self.arrival_time = Some(now);
        self.status = RequestStatus::Arrived;
        true
    }

    /// Any pending state `→ Cancelled`.
    pub fn cancel(&mut self) -> bool {
        if !self.status.is_pending() {
            return false;
        }
        self.status = RequestStatus::Cancelled;
        self.cancel_pending = false;
        true
    }
}
