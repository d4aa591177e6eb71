//! Immutable, owned views of engine state.
//!
//! A snapshot shares nothing with the engine, so it can be handed to another
//! thread (the `SharedEngine` publishes one per tick behind an `Arc`).

use lift_building::HallCall;
use lift_car::{CarState, DoorState, Elevator};
use lift_core::{Direction, ElevatorId, Floor, RequestId, Tick};
use lift_demand::{Request, RequestStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarSnapshot {
    pub id:        ElevatorId,
    pub floor:     Floor,
    pub direction: Direction,
    pub state:     CarState,
    pub doors:     DoorState,
    pub load:      u32,
    pub capacity:  u32,
    /// Queued stops in service order.
    pub stops:     Vec<Floor>,
    pub onboard:   Vec<RequestId>,
    pub floors_travelled: u64,
    pub stops_made:       u64,
}

impl CarSnapshot {
    pub fn of(car: &Elevator) -> Self {
        Self {
            id:               car.id(),
            floor:            car.floor(),
            direction:        car.direction(),
            state:            car.state(),
            doors:            car.door_state(),
            load:             car.load(),
            capacity:         car.capacity(),
            stops:            car.stops().iter().collect(),
            onboard:          car.onboard().iter().map(|p| p.request).collect(),
            floors_travelled: car.floors_travelled(),
            stops_made:       car.stops_made(),
        }
    }

    /// Parked, doors shut, nothing queued.
    pub fn is_idle(&self) -> bool {
        self.state == CarState::Idle && self.stops.is_empty()
    }
}

/// A request that has not boarded yet and has not been withdrawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestSnapshot {
    pub id:           RequestId,
    pub origin:       Floor,
    pub destination:  Floor,
    pub request_time: Tick,
    pub status:       RequestStatus,
    pub assigned:     Option<ElevatorId>,
}

impl RequestSnapshot {
    pub fn of(r: &Request) -> Self {
        Self {
            id:           r.id,
            origin:       r.origin,
            destination:  r.destination,
            request_time: r.request_time,
            status:       r.status,
            assigned:     r.assigned,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineSnapshot {
    /// Next tick to run.
    pub tick:             Tick,
    pub elevators:        Vec<CarSnapshot>,
    /// Scheduled, waiting, and assigned requests, ascending id.  Requests
    /// marked for cancellation are left out.
    pub pending_requests: Vec<RequestSnapshot>,
    /// Lit hall buttons in floor order.
    pub calls:            Vec<HallCall>,
    /// Passengers currently inside any car.
    pub riding:           usize,
    pub delivered:        usize,
    pub cancelled:        usize,
    pub closed:           bool,
}

impl EngineSnapshot {
    /// Cars that are moving, stopping, or have stops queued.
    pub fn active_cars(&self) -> usize {
        self.elevators.iter().filter(|c| !c.is_idle()).count()
    }

    pub fn idle_cars(&self) -> usize {
        self.elevators.len() - self.active_cars()
    }

    pub fn car(&self, id: ElevatorId) -> Option<&CarSnapshot> {
        self.elevators.get(id.index())
    }

    pub fn is_pending(&self, id: RequestId) -> bool {
        self.pending_requests.iter().any(|r| r.id == id)
    }
}
