//! Read-only inputs to a dispatch decision.
//!
//! The engine builds one [`CarView`] per car at the start of the dispatch
//! phase and never mutates cars while policies look at them.  Policies see
//! nothing else of the engine.

use lift_car::{CarState, Elevator};
use lift_core::{Direction, ElevatorId, Floor, RequestId};
use lift_demand::Request;

/// Snapshot of one car, as far as dispatching is concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarView {
    pub id:        ElevatorId,
    pub floor:     Floor,
    pub direction: Direction,
    pub state:     CarState,
    /// Passengers inside.
    pub load:      u32,
    /// `load` plus passengers assigned but not yet boarded.
    pub committed: u32,
    pub capacity:  u32,
    /// Farthest queued stop ahead in `direction`.
    pub last_stop_ahead: Option<Floor>,
    /// Parked with an empty stop queue.
    pub idle: bool,
    /// Doors will still be open at this floor on the next step.
    pub boards_here: bool,
}

impl CarView {
    /// View of `car` with `awaiting` assigned passengers still on landings.
    pub fn of(car: &Elevator, awaiting: u32) -> Self {
        Self {
            id:              car.id(),
            floor:           car.floor(),
            direction:       car.direction(),
            state:           car.state(),
            load:            car.load(),
            committed:       car.load() + awaiting,
            capacity:        car.capacity(),
            last_stop_ahead: car.stops().last_ahead(car.floor(), car.direction()),
            idle:            car.is_idle(),
            boards_here:     car.holding_doors(),
        }
    }

    /// Room left for another assignment.
    #[inline]
    pub fn has_room(&self) -> bool {
        self.committed < self.capacity
    }

    /// Heading `direction` with `origin` still in front of it.  A car at
    /// `origin` counts only while its doors are held open; once they start
    /// closing the floor is behind it.
    pub fn approaching(&self, origin: Floor, direction: Direction) -> bool {
        self.direction == direction
            && (self.direction.is_ahead(self.floor, origin)
                || (self.floor == origin && self.boards_here))
    }

    /// Floors between the car and `floor`.
    #[inline]
    pub fn distance(&self, floor: Floor) -> u32 {
        self.floor.distance(floor)
    }
}

/// Something that needs a car: a passenger request or a bare hall call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestView {
    /// `None` for a hall call nobody is attached to.
    pub request:   Option<RequestId>,
    pub origin:    Floor,
    pub direction: Direction,
    /// Passenger requests reserve a place in the car; hall calls do not.
    pub needs_capacity: bool,
}

impl RequestView {
    pub fn passenger(request: &Request) -> Self {
        Self {
            request:        Some(request.id),
            origin:         request.origin,
            direction:      request.direction(),
            needs_capacity: true,
        }
    }

    pub fn hall_call(floor: Floor, direction: Direction) -> Self {
        Self { request: None, origin: floor, direction, needs_capacity: false }
    }
}
