//! Everything observable that happens inside a tick.

use lift_car::CarEvent;
use lift_core::{Direction, ElevatorId, Floor, RequestId, Tick};

/// One event, stamped with the tick it happened in.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimEvent {
    pub tick: Tick,
    pub kind: EventKind,
}

impl SimEvent {
    #[inline]
    pub fn new(tick: Tick, kind: EventKind) -> Self {
        Self { tick, kind }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// The passenger reached the landing and joined the line.
    RequestQueued {
        request:     RequestId,
        origin:      Floor,
        destination: Floor,
    },
    RequestAssigned { request: RequestId, car: ElevatorId },
    /// The car could not take the passenger; it goes back to dispatch.
    RequestUnassigned { request: RequestId, car: ElevatorId },
    RequestCancelled { request: RequestId },

    CallRegistered { floor: Floor, direction: Direction },
    CallCleared { floor: Floor, direction: Direction, car: ElevatorId },
    /// The lamp went dark because its last waiting passenger cancelled.
    CallWithdrawn { floor: Floor, direction: Direction },

    Car { car: ElevatorId, event: CarEvent },

    Boarded { request: RequestId, car: ElevatorId, floor: Floor },
    Alighted { request: RequestId, car: ElevatorId, floor: Floor },
}

impl EventKind {
    /// Short label, used as the CSV `kind` column.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::RequestQueued { .. }     => "request_queued",
            EventKind::RequestAssigned { .. }   => "request_assigned",
            EventKind::RequestUnassigned { .. } => "request_unassigned",
            EventKind::RequestCancelled { .. }  => "request_cancelled",
            EventKind::CallRegistered { .. }    => "call_registered",
            EventKind::CallCleared { .. }       => "call_cleared",
            EventKind::CallWithdrawn { .. }     => "call_withdrawn",
            EventKind::Car { event, .. } => match event {
                CarEvent::StateChanged { .. } => "state_changed",
                CarEvent::Departed { .. }     => "departed",
                CarEvent::Moved { .. }        => "moved",
                CarEvent::Arrived { .. }      => "arrived",
            },
            EventKind::Boarded { .. }  => "boarded",
            EventKind::Alighted { .. } => "alighted",
        }
    }

    /// The car involved, if any.
    pub fn car(&self) -> Option<ElevatorId> {
        match *self {
            EventKind::RequestAssigned { car, .. }
            | EventKind::RequestUnassigned { car, .. }
            | EventKind::CallCleared { car, .. }
            | EventKind::Car { car, .. }
            | EventKind::Boarded { car, .. }
            | EventKind::Alighted { car, .. } => Some(car),
            _ => None,
        }
    }

    /// The request involved, if any.
    pub fn request(&self) -> Option<RequestId> {
        match *self {
            EventKind::RequestQueued { request, .. }
            | EventKind::RequestAssigned { request, .. }
            | EventKind::RequestUnassigned { request, .. }
            | EventKind::RequestCancelled { request }
            | EventKind::Boarded { request, .. }
            | EventKind::Alighted { request, .. } => Some(request),
            _ => None,
        }
    }

    /// The floor involved, if any.
    pub fn floor(&self) -> Option<Floor> {
        match *self {
            EventKind::RequestQueued { origin, .. } => Some(origin),
            EventKind::CallRegistered { floor, .. }
            | EventKind::CallCleared { floor, .. }
            | EventKind::CallWithdrawn { floor, .. }
            | EventKind::Boarded { floor, .. }
            | EventKind::Alighted { floor, .. } => Some(floor),
            EventKind::Car { event, .. } => match event {
                CarEvent::Departed { floor, .. } | CarEvent::Arrived { floor } => Some(floor),
                CarEvent::Moved { to, .. } => Some(to),
                CarEvent::StateChanged { .. } => None,
            },
            _ => None,
        }
    }
}

/// The ordered events of one tick.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick:   Tick,
    pub events: Vec<SimEvent>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventKind> {
        self.events.iter().map(|e| &e.kind)
    }

    /// Number of events matching `pred`.
    pub fn count(&self, pred: impl Fn(&EventKind) -> bool) -> usize {
        self.iter().filter(|k| pred(k)).count()
    }
}
