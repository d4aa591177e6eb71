//! `TripTracker` — stitches the event stream back into passenger trips.

use std::collections::HashMap;

use lift_core::{ElevatorId, Floor, RequestId, Tick};
use lift_sim::{EventKind, SimEvent};

use crate::TripRow;

struct OpenTrip {
    origin:      Floor,
    destination: Floor,
    requested:   Tick,
    boarded:     Option<(ElevatorId, Tick)>,
}

/// Follows each request from `request_queued` through `boarded` to
/// `alighted` and yields a [`TripRow`] when it completes.  Cancelled
/// requests are dropped.
#[derive(Default)]
pub struct TripTracker {
    open: HashMap<RequestId, OpenTrip>,
}

impl TripTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event; returns the trip it completes, if any.
    pub fn observe(&mut self, event: &SimEvent) -> Option<TripRow> {
        match event.kind {
            EventKind::RequestQueued { request, origin, destination } => {
                self.open.insert(
                    request,
                    OpenTrip { origin, destination, requested: event.tick, boarded: None },
                );
                None
            }
            EventKind::Boarded { request, car, .. } => {
                if let Some(trip) = self.open.get_mut(&request) {
                    trip.boarded = Some((car, event.tick));
                }
                None
            }
            EventKind::RequestCancelled { request } => {
                self.open.remove(&request);
                None
            }
            EventKind::Alighted { request, .. } => {
                let trip = self.open.remove(&request)?;
                let (car, boarded) = trip.boarded?;
                Some(TripRow {
                    request:      request.0,
                    car:          car.0,
                    origin:       trip.origin.0,
                    destination:  trip.destination.0,
                    request_tick: trip.requested.0,
                    board_tick:   boarded.0,
                    arrival_tick: event.tick.0,
                })
            }
            _ => None,
        }
    }

    /// `request` has been queued and has neither finished nor been cancelled.
    pub fn is_open(&self, request: RequestId) -> bool {
        self.open.contains_key(&request)
    }

    /// Trips queued but not yet finished.
    pub fn in_progress(&self) -> usize {
        self.open.len()
    }

    /// Of those, how many are riding.
    pub fn riding(&self) -> usize {
        self.open.values().filter(|t| t.boarded.is_some()).count()
    }
}
