//! Policies that ship with the engine.

use lift_car::StopOrdering;
use lift_core::{Direction, DispatchPolicyKind};

use crate::{CarView, Cost, DispatchPolicy, RequestView};

// ── NearestCar ────────────────────────────────────────────────────────────────

/// Nearest car, preferring cars already on their way.
///
/// | Tier | Car                                                  |
/// |------|------------------------------------------------------|
/// | 0    | heading the request's way with the origin in front   |
/// | 1    | idle                                                 |
/// | 2    | anything else                                        |
///
/// Within a tier, fewer floors wins.
#[derive(Copy, Clone, Debug, Default)]
pub struct NearestCar;

impl DispatchPolicy for NearestCar {
    fn score(&self, car: &CarView, request: &RequestView) -> Option<Cost> {
        let tier = if car.approaching(request.origin, request.direction) {
            0
        } else if car.idle {
            1
        } else {
            2
        };
        Some(Cost::new(tier, car.distance(request.origin)))
    }

    fn name(&self) -> &'static str {
        "nearest_car"
    }
}

// ── Scan ──────────────────────────────────────────────────────────────────────

/// Floors travelled along the car's sweep before it reaches the caller.
///
/// A car moving away first runs out to its farthest stop ahead, then comes
/// back.  When the caller sits behind the car but wants to travel the car's
/// way, the car must reverse twice; such cars rank in tier 1 behind every
/// car that reaches the caller with at most one reversal.
#[derive(Copy, Clone, Debug, Default)]
pub struct Scan;

impl DispatchPolicy for Scan {
    fn score(&self, car: &CarView, request: &RequestView) -> Option<Cost> {
        let origin = request.origin;
        let heading = car.direction;
        if heading == Direction::Idle || car.approaching(origin, request.direction) {
            return Some(Cost::new(0, car.distance(origin)));
        }

        let turn = car.last_stop_ahead.unwrap_or(car.floor);
        // Run out to the far end of the sweep (or the caller, if farther).
        let peak = if heading.is_ahead(turn, origin) { origin } else { turn };
        let floors = car.distance(peak) + peak.distance(origin);
        let tier = if request.direction == heading { 1 } else { 0 };
        Some(Cost::new(tier, floors))
    }

    fn name(&self) -> &'static str {
        "scan"
    }
}

// ── FirstCome ─────────────────────────────────────────────────────────────────

/// Lowest-id car with room; every car stops in request order.
#[derive(Copy, Clone, Debug, Default)]
pub struct FirstCome;

impl DispatchPolicy for FirstCome {
    fn score(&self, _car: &CarView, _request: &RequestView) -> Option<Cost> {
        Some(Cost::ZERO)
    }

    fn stop_ordering(&self) -> StopOrdering {
        StopOrdering::Fifo
    }

    fn name(&self) -> &'static str {
        "first_come"
    }
}

// ── BuiltinPolicy ─────────────────────────────────────────────────────────────

/// One of the built-in policies, chosen at run time from
/// [`DispatchPolicyKind`].
#[derive(Copy, Clone, Debug)]
pub enum BuiltinPolicy {
    NearestCar(NearestCar),
    Scan(Scan),
    FirstCome(FirstCome),
}

impl Default for BuiltinPolicy {
    fn default() -> Self {
        BuiltinPolicy::NearestCar(NearestCar)
    }
}

impl From<DispatchPolicyKind> for BuiltinPolicy {
    fn from(kind: DispatchPolicyKind) -> Self {
        match kind {
            DispatchPolicyKind::NearestCar => BuiltinPolicy::NearestCar(NearestCar),
            DispatchPolicyKind::Scan       => BuiltinPolicy::Scan(Scan),
            DispatchPolicyKind::FirstCome  => BuiltinPolicy::FirstCome(FirstCome),
        }
    }
}

impl BuiltinPolicy {
    pub fn kind(&self) -> DispatchPolicyKind {
        match self {
            BuiltinPolicy::NearestCar(_) => DispatchPolicyKind::NearestCar,
            BuiltinPolicy::Scan(_)       => DispatchPolicyKind::Scan,
            BuiltinPolicy::FirstCome(_)  => DispatchPolicyKind::FirstCome,
        }
    }

    fn inner(&self) -> &dyn DispatchPolicy {
        match self {
            BuiltinPolicy::NearestCar(p) => p,
            BuiltinPolicy::Scan(p)       => p,
            BuiltinPolicy::FirstCome(p)  => p,
        }
    }
}

impl DispatchPolicy for BuiltinPolicy {
    fn score(&self, car: &CarView, request: &RequestView) -> Option<Cost> {
        self.inner().score(car, request)
    }

    fn stop_ordering(&self) -> StopOrdering {
        self.inner().stop_ordering()
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}
