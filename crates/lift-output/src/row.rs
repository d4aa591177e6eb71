//! Plain data row types written by output backends.

use lift_car::CarEvent;
use lift_sim::{EventKind, SimEvent, TickReport};

/// One engine event, flattened for tabular output.
///
/// `detail` carries the one field that does not fit the fixed columns:
/// the destination of a queued request, the direction of a call or
/// departure, `from->to` for a state change, and the floor left for a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:    u64,
    pub kind:    &'static str,
    pub car:     Option<u32>,
    pub request: Option<u64>,
    pub floor:   Option<u32>,
    pub detail:  String,
}

impl EventRow {
    pub fn from_event(event: &SimEvent) -> Self {
        let kind = &event.kind;
        let detail = match *kind {
            EventKind::RequestQueued { destination, .. } => destination.0.to_string(),
            EventKind::CallRegistered { direction, .. }
            | EventKind::CallCleared { direction, .. }
            | EventKind::CallWithdrawn { direction, .. } => direction.as_str().to_owned(),
            EventKind::Car { event, .. } => match event {
                CarEvent::StateChanged { from, to } => format!("{}->{}", from.as_str(), to.as_str()),
                CarEvent::Departed { direction, .. } => direction.as_str().to_owned(),
                CarEvent::Moved { from, .. } => from.0.to_string(),
                CarEvent::Arrived { .. } => String::new(),
            },
            _ => String::new(),
        };
        Self {
            tick:    event.tick.0,
            kind:    kind.name(),
            car:     kind.car().map(|c| c.0),
            request: kind.request().map(|r| r.0),
            floor:   kind.floor().map(|f| f.0),
            detail,
        }
    }
}

/// A finished passenger trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRow {
    pub request:      u64,
    pub car:          u32,
    pub origin:       u32,
    pub destination:  u32,
    pub request_tick: u64,
    pub board_tick:   u64,
    pub arrival_tick: u64,
}

impl TripRow {
    #[inline]
    pub fn wait_ticks(&self) -> u64 {
        self.board_tick - self.request_tick
    }

    #[inline]
    pub fn travel_ticks(&self) -> u64 {
        self.arrival_tick - self.board_tick
    }

    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.arrival_tick - self.request_tick
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub elapsed_secs: u64,
    pub events:       u32,
    pub queued:       u32,
    pub boarded:      u32,
    pub alighted:     u32,
    pub cancelled:    u32,
}

impl TickSummaryRow {
    pub fn from_report(report: &TickReport, tick_duration_secs: u32) -> Self {
        let count = |pred: fn(&EventKind) -> bool| report.count(pred) as u32;
        Self {
            tick:         report.tick.0,
            elapsed_secs: report.tick.0 * tick_duration_secs as u64,
            events:       report.events.len() as u32,
            queued:       count(|k| matches!(k, EventKind::RequestQueued { .. })),
            boarded:      count(|k| matches!(k, EventKind::Boarded { .. })),
            alighted:     count(|k| matches!(k, EventKind::Alighted { .. })),
            cancelled:    count(|k| matches!(k, EventKind::RequestCancelled { .. })),
        }
    }
}
