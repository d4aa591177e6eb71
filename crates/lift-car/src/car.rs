//! `Elevator` — one car's state machine, stop queue, and passengers.
//!
//! The engine drives every car through exactly one [`Elevator::step`] per
//! tick, then (for cars whose doors are open) [`Elevator::resolve_direction`],
//! [`Elevator::alight_at`], and [`Elevator::board_if_present_at`], in that
//! order.  Nothing else mutates a car.

use lift_building::FloorQueues;
use lift_core::{Direction, ElevatorId, EngineConfig, Floor, RequestId, Tick};
use lift_demand::{RequestStatus, RequestStore};
use tracing::{debug, warn};

use crate::{CarError, CarEvent, CarResult, CarState, DoorState, StopOrdering, StopQueue};

/// A boarded passenger.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passenger {
    pub request:     RequestId,
    pub destination: Floor,
}

/// What happened at one boarding opportunity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardingOutcome {
    pub boarded:   Vec<RequestId>,
    /// Assigned to this car but not taken (car full or heading the other
    /// way).  Returned to `Waiting` so the dispatcher can place them again.
    pub deferred:  Vec<RequestId>,
    /// Cancelled while the car was on its way; dropped from the landing.
    pub cancelled: Vec<RequestId>,
}

impl BoardingOutcome {
    pub fn is_empty(&self) -> bool {
        self.boarded.is_empty() && self.deferred.is_empty() && self.cancelled.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Elevator {
    id:          ElevatorId,
    floors:      u32,
    capacity:    u32,
    dwell_ticks: u32,

    floor:      Floor,
    direction:  Direction,
    state:      CarState,
    /// Dwell ticks left while `DoorsOpen`.
    dwell_left: u32,

    stops:   StopQueue,
    onboard: Vec<Passenger>,

    floors_travelled: u64,
    stops_made:       u64,
}

impl Elevator {
    /// A car parked at `config.start_floor` with its doors shut.
    pub fn new(id: ElevatorId, config: &EngineConfig, ordering: StopOrdering) -> Self {
        Self {
            id,
            floors:           config.floors,
            capacity:         config.capacity_per_elevator,
            dwell_ticks:      config.door_dwell_ticks,
            floor:            config.start_floor(),
            direction:        Direction::Idle,
            state:            CarState::Idle,
            dwell_left:       0,
            stops:            StopQueue::new(ordering),
            onboard:          Vec::with_capacity(config.capacity_per_elevator as usize),
            floors_travelled: 0,
            stops_made:       0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn id(&self) -> ElevatorId { self.id }
    #[inline] pub fn floor(&self) -> Floor { self.floor }
    #[inline] pub fn direction(&self) -> Direction { self.direction }
    #[inline] pub fn state(&self) -> CarState { self.state }
    #[inline] pub fn door_state(&self) -> DoorState { self.state.door_state() }
    #[inline] pub fn capacity(&self) -> u32 { self.capacity }
    #[inline] pub fn stops(&self) -> &StopQueue { &self.stops }
    #[inline] pub fn onboard(&self) -> &[Passenger] { &self.onboard }
    #[inline] pub fn floors_travelled(&self) -> u64 { self.floors_travelled }
    #[inline] pub fn stops_made(&self) -> u64 { self.stops_made }

    /// Passengers currently inside.
    #[inline]
    pub fn load(&self) -> u32 {
        self.onboard.len() as u32
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.load() >= self.capacity
    }

    /// Parked with nothing to do.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == CarState::Idle && self.stops.is_empty()
    }

    /// Doors stay open through the next step, so a passenger arriving at
    /// this floor now can still board without the car coming back.
    pub fn holding_doors(&self) -> bool {
        match self.state {
            CarState::DoorsOpening => true,
            CarState::DoorsOpen    => self.dwell_left > 0,
            _                      => false,
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Queue a stop at `floor`.
    ///
    /// Returns `Ok(false)` when the floor is already queued or the car is
    /// standing there with doors that stay open through the next step.  A car
    /// whose dwell has run out queues the stop and reopens after closing.
    pub fn request_stop(&mut self, floor: Floor) -> CarResult<bool> {
        if floor.0 >= self.floors {
            return Err(CarError::OutOfRange { car: self.id, floor, floors: self.floors });
        }
        if floor == self.floor && self.holding_doors() {
            return Ok(false);
        }
        let added = self.stops.insert(floor, self.floor, self.direction);
        if added {
            debug!(car = %self.id, %floor, queued = self.stops.len(), "stop queued");
        }
        Ok(added)
    }

    /// Change heading, re-sorting the stop queue for the new sweep.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction != direction {
            self.direction = direction;
            self.stops.reorder(self.floor, direction);
        }
    }

    /// Pick the heading for the stop the car is standing at.
    ///
    /// Keeps the current heading while queued stops remain ahead.  Otherwise
    /// follows the passengers assigned to this car who wait here (same way
    /// first), then the next queued stop, and finally goes `Idle`.
    pub fn resolve_direction(&mut self, waiting_up: bool, waiting_down: bool) -> Direction {
        let current = self.direction;
        let next = if current.is_moving() && self.stops.any_ahead(self.floor, current) {
            current
        } else {
            let preferred = if current == Direction::Down { Direction::Down } else { Direction::Up };
            let waiting = |d: Direction| if d == Direction::Up { waiting_up } else { waiting_down };
            if waiting(preferred) {
                preferred
            } else if waiting(preferred.opposite()) {
                preferred.opposite()
            } else {
                self.stops
                    .front()
                    .map_or(Direction::Idle, |t| Direction::between(self.floor, t))
            }
        };
        self.set_direction(next);
        next
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance one tick: at most one state transition and at most one floor
    /// of travel.
    pub fn step(&mut self) -> Vec<CarEvent> {
        let mut events = Vec::new();
        match self.state {
            CarState::Idle | CarState::DoorsClosing => self.leave(&mut events),
            CarState::MovingUp | CarState::MovingDown => self.travel(&mut events),
            CarState::DoorsOpening => {
                self.dwell_left = self.dwell_ticks;
                self.transition(CarState::DoorsOpen, &mut events);
            }
            CarState::DoorsOpen => {
                if self.dwell_left == 0 {
                    self.transition(CarState::DoorsClosing, &mut events);
                } else {
                    self.dwell_left -= 1;
                }
            }
        }
        events
    }

    /// Doors are shut: reopen for a stop here, head for the next stop, or park.
    fn leave(&mut self, events: &mut Vec<CarEvent>) {
        let Some(target) = self.stops.front() else {
            self.direction = Direction::Idle;
            self.transition(CarState::Idle, events);
            return;
        };
        if target == self.floor {
            self.stops.remove(target);
            self.open_doors(events);
            return;
        }
        let direction = Direction::between(self.floor, target);
        self.set_direction(direction);
        events.push(CarEvent::Departed { floor: self.floor, direction });
        self.transition(CarState::moving(direction), events);
        self.advance(events);
    }

    fn travel(&mut self, events: &mut Vec<CarEvent>) {
        if !self.stops.any_ahead(self.floor, self.direction) {
            match self.stops.front() {
                None => {
                    self.direction = Direction::Idle;
                    self.transition(CarState::Idle, events);
                    return;
                }
                // Queued for the floor the car is still level with.
                Some(target) if target == self.floor => {
                    self.stops.remove(target);
                    self.open_doors(events);
                    return;
                }
                Some(target) => {
                    let direction = Direction::between(self.floor, target);
                    self.set_direction(direction);
                    self.transition(CarState::moving(direction), events);
                }
            }
        }
        self.advance(events);
    }

    /// Move one floor in the current direction and stop if it is queued.
    fn advance(&mut self, events: &mut Vec<CarEvent>) {
        let from = self.floor;
        let to = from.step(self.direction.sign());
        debug_assert!(to != from && to.0 < self.floors, "{} left the shaft", self.id);
        self.floor = to;
        self.floors_travelled += 1;
        events.push(CarEvent::Moved { from, to });
        if self.stops.remove(to) {
            self.open_doors(events);
        }
    }

    fn open_doors(&mut self, events: &mut Vec<CarEvent>) {
        self.stops_made += 1;
        events.push(CarEvent::Arrived { floor: self.floor });
        self.transition(CarState::DoorsOpening, events);
    }

    fn transition(&mut self, to: CarState, events: &mut Vec<CarEvent>) {
        if self.state != to {
            events.push(CarEvent::StateChanged { from: self.state, to });
            self.state = to;
        }
    }

    // ── Passengers ────────────────────────────────────────────────────────

    /// Let out every passenger whose destination is `floor`, stamping their
    /// arrival time.  Only while the doors are open at `floor`.
    pub fn alight_at(
        &mut self,
        floor:    Floor,
        requests: &mut RequestStore,
        now:      Tick,
    ) -> Vec<RequestId> {
        if self.state != CarState::DoorsOpen || floor != self.floor {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.onboard.retain(|p| {
            if p.destination != floor {
                return true;
            }
            if let Some(r) = requests.get_mut(p.request) {
                r.arrive(now);
            }
            out.push(p.request);
            false
        });
        out
    }

    /// Take on passengers assigned to this car from the landing at `floor`.
    ///
    /// Passengers are taken in line order from the line matching the car's
    /// heading (both lines when idle) until the car is full.  Those assigned
    /// here but not taken go back to `Waiting`; those marked for
    /// cancellation are cancelled.
    pub fn board_if_present_at(
        &mut self,
        floor:    Floor,
        queues:   &mut FloorQueues,
        requests: &mut RequestStore,
        now:      Tick,
    ) -> BoardingOutcome {
        let mut outcome = BoardingOutcome::default();
        if self.state != CarState::DoorsOpen || floor != self.floor {
            return outcome;
        }

        for line in [Direction::Up, Direction::Down] {
            let compatible = self.direction == Direction::Idle || self.direction == line;
            let waiting: Vec<RequestId> = queues.waiting(floor, line).collect();
            for id in waiting {
                let Some(r) = requests.get_mut(id) else { continue };
                if r.status != RequestStatus::Assigned || r.assigned != Some(self.id) {
                    continue;
                }
                if r.cancel_pending {
                    r.cancel();
                    queues.remove(floor, id);
                    outcome.cancelled.push(id);
                } else if !compatible {
                    r.unassign();
                    outcome.deferred.push(id);
                } else if self.onboard.len() as u32 >= self.capacity {
                    r.unassign();
                    warn!(car = %self.id, request = %id, %floor, "car full, passenger deferred");
                    outcome.deferred.push(id);
                } else if r.board(now) {
                    let destination = r.destination;
                    queues.remove(floor, id);
                    self.onboard.push(Passenger { request: id, destination });
                    self.stops.insert(destination, self.floor, self.direction);
                    outcome.boarded.push(id);
                }
            }
        }

        if self.direction == Direction::Idle {
            if let Some(t) = self.stops.front() {
                self.set_direction(Direction::between(self.floor, t));
            }
        }
        debug_assert!(self.onboard.len() as u32 <= self.capacity);
        outcome
    }
}
