//! The `Engine` struct and its tick loop.

use lift_building::{Building, CallPanel, FloorQueues};
use lift_car::{CarState, Elevator};
use lift_core::{Direction, ElevatorId, EngineConfig, Floor, RequestId, SimClock, Tick};
use lift_demand::{ArrivalQueue, Request, RequestStatus, RequestStore};
use lift_dispatch::{BuiltinPolicy, CarView, DispatchPolicy, Dispatcher, RequestView};
use tracing::{debug, info, trace};

use crate::{
    CarSnapshot, EngineError, EngineResult, EngineSnapshot, EventKind, RequestSnapshot, SimEvent,
    SimObserver, TickReport,
};

// ── Input validation ──────────────────────────────────────────────────────────

pub(crate) fn check_floor(config: &EngineConfig, floor: Floor) -> EngineResult<Floor> {
    if config.contains(floor) {
        Ok(floor)
    } else {
        Err(EngineError::OutOfRange { floor, floors: config.floors, reason: "outside the building" })
    }
}

pub(crate) fn check_trip(config: &EngineConfig, origin: Floor, destination: Floor) -> EngineResult<()> {
    check_floor(config, origin)?;
    check_floor(config, destination)?;
    if origin == destination {
        return Err(EngineError::OutOfRange {
            floor:  destination,
            floors: config.floors,
            reason: "destination equals origin",
        });
    }
    Ok(())
}

pub(crate) fn check_call(config: &EngineConfig, floor: Floor, direction: Direction) -> EngineResult<()> {
    check_floor(config, floor)?;
    if direction == Direction::Idle {
        return Err(EngineError::OutOfRange {
            floor,
            floors: config.floors,
            reason: "a hall call needs a direction",
        });
    }
    Ok(())
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// `Engine<P>` owns the building, every car, every request, and the clock.
/// Each [`tick`][Self::tick] runs, in order:
///
/// 1. **Release & dispatch**: scheduled requests due this tick join their
///    landing's line and light the hall button; waiting requests (ascending
///    id) and then unanswered hall calls are handed to the [`Dispatcher`].
/// 2. **Step**: every car (ascending id) makes one state transition and at
///    most one floor of travel.
/// 3. **Service**: at every car whose doors are open, pick a heading,
///    let passengers out, take assigned passengers in, and turn off the
///    answered hall buttons.
/// 4. **Report**: all events of the tick, in emission order.
/// 5. **Advance** the clock.
///
/// Calls made between ticks (`cancel_request`, `press_hall_call`) record
/// their events in the next tick's report.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine<P: DispatchPolicy = BuiltinPolicy> {
    config:     EngineConfig,
    building:   Building,
    clock:      SimClock,
    cars:       Vec<Elevator>,
    dispatcher: Dispatcher<P>,

    requests: RequestStore,
    /// Requests submitted for a future tick.
    arrivals: ArrivalQueue,
    /// Passengers standing at each landing.
    queues:   FloorQueues,
    calls:    CallPanel,

    /// Events produced between ticks, flushed into the next report.
    outbox:       Vec<SimEvent>,
    next_request: u64,
    closed:       bool,
}

impl<P: DispatchPolicy> Engine<P> {
    pub(crate) fn from_parts(
        config:     EngineConfig,
        building:   Building,
        cars:       Vec<Elevator>,
        dispatcher: Dispatcher<P>,
    ) -> Self {
        Self {
            clock:        config.make_clock(),
            queues:       FloorQueues::new(config.floors),
            calls:        CallPanel::new(config.floors),
            config,
            building,
            cars,
            dispatcher,
            requests:     RequestStore::new(),
            arrivals:     ArrivalQueue::new(),
            outbox:       Vec::new(),
            next_request: 0,
            closed:       false,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn building(&self) -> &Building {
        &self.building
    }

    /// The next tick to run.
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn cars(&self) -> &[Elevator] {
        &self.cars
    }

    pub fn car(&self, id: ElevatorId) -> Option<&Elevator> {
        self.cars.get(id.index())
    }

    pub fn request(&self, id: RequestId) -> Option<&Request> {
        self.requests.get(id)
    }

    pub fn requests(&self) -> &RequestStore {
        &self.requests
    }

    pub fn calls(&self) -> &CallPanel {
        &self.calls
    }

    pub fn policy(&self) -> &P {
        self.dispatcher.policy()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn next_request_id(&self) -> u64 {
        self.next_request
    }

    /// Nothing scheduled, waiting, riding, or moving, and no button lit.
    pub fn is_quiescent(&self) -> bool {
        self.outbox.is_empty()
            && self.arrivals.is_empty()
            && self.requests.all_settled()
            && self.calls.is_empty()
            && self.cars.iter().all(Elevator::is_idle)
    }

    // ── Boundary operations ───────────────────────────────────────────────

    /// Submit a passenger travelling `origin → destination` who reaches the
    /// landing at `at`.  A time in the past means "now".
    ///
    /// The request joins its landing at the start of the tick it is due.
    pub fn submit_request(
        &mut self,
        origin:      Floor,
        destination: Floor,
        at:          Tick,
    ) -> EngineResult<RequestId> {
        self.ensure_open()?;
        check_trip(&self.config, origin, destination)?;
        let id = RequestId(self.next_request);
        self.accept(id, origin, destination, at)?;
        Ok(id)
    }

    /// Record a request whose id was allocated elsewhere.  Inputs must have
    /// passed `check_trip`.
    pub(crate) fn accept(
        &mut self,
        id:          RequestId,
        origin:      Floor,
        destination: Floor,
        at:          Tick,
    ) -> EngineResult<()> {
        let request_time = at.max(self.now());
        let request = Request::new(id, origin, destination, request_time).map_err(|_| {
            EngineError::OutOfRange {
                floor:  destination,
                floors: self.config.floors,
                reason: "destination equals origin",
            }
        })?;
        let inserted = self.requests.insert(request);
        debug_assert!(inserted, "{id} submitted twice");
        self.arrivals.push(request_time, id);
        self.next_request = self.next_request.max(id.0 + 1);
        debug!(request = %id, %origin, %destination, due = %request_time, "request accepted");
        Ok(())
    }

    /// Withdraw a request that has not boarded.
    ///
    /// A request still on its way to the landing or waiting there is
    /// cancelled at once; if it was the last in line, its hall lamp goes dark
    /// unless the button was also pressed by hand.  One already assigned is marked and dropped when
    /// its car next opens at the landing; the car's route is left alone.
    /// Returns `Ok(false)` for an unknown, boarded, delivered, or already
    /// cancelled request.
    pub fn cancel_request(&mut self, id: RequestId) -> EngineResult<bool> {
        self.ensure_open()?;
        let now = self.now();
        let Some(r) = self.requests.get_mut(id) else {
            return Ok(false);
        };
        let mut left_line = None;
        let cancelled = match r.status {
            RequestStatus::Scheduled => {
                self.arrivals.remove(id);
                r.cancel()
            }
            RequestStatus::Waiting => {
                self.queues.remove(r.origin, id);
                left_line = Some((r.origin, r.direction()));
                r.cancel()
            }
            RequestStatus::Assigned if !r.cancel_pending => {
                r.cancel_pending = true;
                debug!(request = %id, car = ?r.assigned, "cancel pending until boarding");
                return Ok(true);
            }
            _ => false,
        };
        if cancelled {
            debug!(request = %id, "request cancelled");
            self.outbox.push(SimEvent::new(now, EventKind::RequestCancelled { request: id }));
        }
        // Nobody left behind the lamp: turn it off unless pressed by hand.
        if let Some((floor, direction)) = left_line {
            if self.queues.count(floor, direction) == 0 && self.calls.withdraw(floor, direction).is_some() {
                debug!(%floor, %direction, "hall call withdrawn");
                self.outbox.push(SimEvent::new(now, EventKind::CallWithdrawn { floor, direction }));
            }
        }
        Ok(cancelled)
    }

    /// Light a hall button with no passenger attached.  Returns `Ok(false)`
    /// if it was already lit.
    pub fn press_hall_call(&mut self, floor: Floor, direction: Direction) -> EngineResult<bool> {
        self.ensure_open()?;
        check_call(&self.config, floor, direction)?;
        let now = self.now();
        let lit = self.calls.press_manual(floor, direction, now)?;
        if lit {
            self.outbox.push(SimEvent::new(now, EventKind::CallRegistered { floor, direction }));
        }
        Ok(lit)
    }

    /// Press a floor button inside `car`.
    pub fn press_car_button(&mut self, car: ElevatorId, floor: Floor) -> EngineResult<bool> {
        self.ensure_open()?;
        let elevator = self.cars.get_mut(car.index()).ok_or(EngineError::UnknownCar(car))?;
        Ok(elevator.request_stop(floor)?)
    }

    /// An owned view of the current state.
    pub fn snapshot(&self) -> EngineSnapshot {
        let count = |s: RequestStatus| self.requests.iter().filter(|r| r.status == s).count();
        EngineSnapshot {
            tick:             self.now(),
            elevators:        self.cars.iter().map(CarSnapshot::of).collect(),
            pending_requests: self
                .requests
                .pending()
                .filter(|r| !r.cancel_pending)
                .map(RequestSnapshot::of)
                .collect(),
            calls:            self.calls.pending().copied().collect(),
            riding:           self.cars.iter().map(|c| c.onboard().len()).sum(),
            delivered:        count(RequestStatus::Arrived),
            cancelled:        count(RequestStatus::Cancelled),
            closed:           self.closed,
        }
    }

    /// Stop accepting work.  Every later mutating call fails with
    /// [`EngineError::Closed`].  Returns `false` if already shut down.
    pub fn shutdown(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        info!(
            tick      = %self.now(),
            requests  = self.requests.len(),
            delivered = self.requests.iter().filter(|r| r.status == RequestStatus::Arrived).count(),
            "engine shut down"
        );
        true
    }

    /// [`shutdown`][Self::shutdown], telling `observer` the first time.
    pub fn shutdown_with<O: SimObserver>(&mut self, observer: &mut O) {
        if self.shutdown() {
            observer.on_shutdown(self.now());
        }
    }

    // ── Driver helpers ────────────────────────────────────────────────────

    /// Run exactly `n` ticks, forwarding everything to `observer`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> EngineResult<()> {
        for _ in 0..n {
            self.tick_observed(observer)?;
        }
        Ok(())
    }

    /// Tick until [`is_quiescent`][Self::is_quiescent] or `max_ticks` have
    /// run.  Returns the number of ticks run.
    pub fn run_until_idle<O: SimObserver>(
        &mut self,
        max_ticks: u64,
        observer:  &mut O,
    ) -> EngineResult<u64> {
        let mut ran = 0;
        while ran < max_ticks && !self.is_quiescent() {
            self.tick_observed(observer)?;
            ran += 1;
        }
        Ok(ran)
    }

    fn tick_observed<O: SimObserver>(&mut self, observer: &mut O) -> EngineResult<TickReport> {
        observer.on_tick_start(self.now());
        let report = self.tick()?;
        for event in &report.events {
            observer.on_event(event);
        }
        observer.on_tick_end(&report);
        Ok(report)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Run one tick and report what happened.
    pub fn tick(&mut self) -> EngineResult<TickReport> {
        self.ensure_open()?;
        let now = self.now();
        let mut events = std::mem::take(&mut self.outbox);

        // ── Phase 1: release due requests, then dispatch ──────────────────
        self.release_arrivals(now, &mut events);
        self.dispatch(now, &mut events);

        // ── Phase 2: state machines, ascending car id ─────────────────────
        for car in &mut self.cars {
            let id = car.id();
            events.extend(
                car.step()
                    .into_iter()
                    .map(|event| SimEvent::new(now, EventKind::Car { car: id, event })),
            );
        }

        // ── Phase 3: alight and board wherever doors are open ─────────────
        for i in 0..self.cars.len() {
            if self.cars[i].state() == CarState::DoorsOpen {
                self.service_stop(i, now, &mut events);
            }
        }

        self.clock.advance();
        trace!(tick = %now, events = events.len(), waiting = self.queues.len(), "tick");
        Ok(TickReport { tick: now, events })
    }

    fn release_arrivals(&mut self, now: Tick, events: &mut Vec<SimEvent>) {
        for id in self.arrivals.drain_due(now) {
            let Some(r) = self.requests.get_mut(id) else { continue };
            if !r.release() {
                continue;
            }
            let (origin, destination, direction) = (r.origin, r.destination, r.direction());
            self.queues.push(origin, direction, id);
            events.push(SimEvent::new(now, EventKind::RequestQueued { request: id, origin, destination }));
            if let Ok(true) = self.calls.press(origin, direction, now) {
                events.push(SimEvent::new(now, EventKind::CallRegistered { floor: origin, direction }));
            }
        }
    }

    /// Hand waiting passengers, then hall calls nobody answers, to the
    /// dispatcher.  A passenger no car has room for stays `Waiting`.
    fn dispatch(&mut self, now: Tick, events: &mut Vec<SimEvent>) {
        let mut batch: Vec<RequestView> = self
            .requests
            .iter()
            .filter(|r| r.status == RequestStatus::Waiting)
            .map(RequestView::passenger)
            .collect();
        // Calls with passengers in line are answered through those passengers.
        batch.extend(
            self.calls
                .unserved()
                .into_iter()
                .filter(|&(floor, direction)| self.queues.count(floor, direction) == 0)
                .map(|(floor, direction)| RequestView::hall_call(floor, direction)),
        );
        if batch.is_empty() {
            return;
        }

        let mut awaiting = vec![0u32; self.cars.len()];
        for r in self.requests.pending() {
            if let (RequestStatus::Assigned, Some(car)) = (r.status, r.assigned) {
                awaiting[car.index()] += 1;
            }
        }
        let mut views: Vec<CarView> = self
            .cars
            .iter()
            .map(|c| CarView::of(c, awaiting[c.id().index()]))
            .collect();

        let picks = self.dispatcher.assign_batch(&batch, &mut views);
        for (view, pick) in batch.iter().zip(picks) {
            let Some(car) = pick else { continue };
            if let Some(id) = view.request {
                if let Some(r) = self.requests.get_mut(id) {
                    r.assign(car);
                }
                debug!(request = %id, %car, origin = %view.origin, "request assigned");
                events.push(SimEvent::new(now, EventKind::RequestAssigned { request: id, car }));
            } else {
                debug!(%car, floor = %view.origin, direction = %view.direction, "hall call assigned");
            }
            self.calls.assign(view.origin, view.direction, car);
            let queued = self.cars[car.index()].request_stop(view.origin);
            debug_assert!(queued.is_ok(), "origin {} passed check_trip", view.origin);
        }
    }

    /// Doors are open at car `i`: heading, alighting, boarding, call lamps.
    fn service_stop(&mut self, i: usize, now: Tick, events: &mut Vec<SimEvent>) {
        let Self { cars, requests, queues, calls, .. } = self;
        let car = &mut cars[i];
        let (id, floor) = (car.id(), car.floor());

        // Who is waiting here for this car, per direction.
        let expects = |d: Direction| {
            queues.waiting(floor, d).any(|r| {
                requests
                    .get(r)
                    .is_some_and(|r| r.status == RequestStatus::Assigned && r.assigned == Some(id))
            }) || calls.get(floor, d).is_some_and(|c| c.served_by == Some(id))
        };
        let (up, down) = (expects(Direction::Up), expects(Direction::Down));
        car.resolve_direction(up, down);

        for request in car.alight_at(floor, requests, now) {
            events.push(SimEvent::new(now, EventKind::Alighted { request, car: id, floor }));
        }

        let outcome = car.board_if_present_at(floor, queues, requests, now);
        for &request in &outcome.cancelled {
            events.push(SimEvent::new(now, EventKind::RequestCancelled { request }));
        }
        for &request in &outcome.boarded {
            events.push(SimEvent::new(now, EventKind::Boarded { request, car: id, floor }));
        }
        for &request in &outcome.deferred {
            events.push(SimEvent::new(now, EventKind::RequestUnassigned { request, car: id }));
        }

        // A lamp goes off once the car heads its way (or sits idle with
        // only that lamp lit) and nobody is left in its line.
        let direction = car.direction();
        let lit = [Direction::Up, Direction::Down]
            .into_iter()
            .filter(|&d| calls.is_pending(floor, d))
            .count();
        for d in [Direction::Up, Direction::Down] {
            let Some(call) = calls.get(floor, d).copied() else { continue };
            let serves = direction == d || (direction == Direction::Idle && lit == 1);
            if serves && queues.count(floor, d) == 0 {
                calls.clear(floor, d);
                events.push(SimEvent::new(now, EventKind::CallCleared { floor, direction: d, car: id }));
            } else if !serves && call.served_by == Some(id) {
                calls.unassign(floor, d);
            }
        }
    }

    fn ensure_open(&self) -> EngineResult<()> {
        if self.closed { Err(EngineError::Closed) } else { Ok(()) }
    }
}
