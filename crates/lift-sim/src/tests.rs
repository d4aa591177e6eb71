//! Unit tests for lift-sim.

use lift_core::{EngineConfig, Floor, Tick};
use lift_demand::{LoadGenerator, LoadProfile};

use crate::{Engine, EngineBuilder, SimObserver, TickReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(floors: u32, elevators: u32, capacity: u32, dwell: u32) -> EngineConfig {
    EngineConfig {
        floors,
        elevators,
        capacity_per_elevator: capacity,
        door_dwell_ticks: dwell,
        ..Default::default()
    }
}

fn engine(cfg: EngineConfig) -> Engine {
    EngineBuilder::new(cfg).build().unwrap()
}

/// Collects every report.
#[derive(Default)]
struct Recorder {
    started:  Vec<Tick>,
    events:   usize,
    reports:  Vec<TickReport>,
    shutdown: Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.started.push(tick);
    }

    fn on_event(&mut self, _event: &crate::SimEvent) {
        self.events += 1;
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.reports.push(report.clone());
    }

    fn on_shutdown(&mut self, final_tick: Tick) {
        self.shutdown = Some(final_tick);
    }
}

fn run_to_idle(e: &mut Engine, max: u64) -> Recorder {
    let mut rec = Recorder::default();
    e.run_until_idle(max, &mut rec).unwrap();
    assert!(e.is_quiescent(), "engine still busy after {max} ticks");
    rec
}

fn load(floors: u32, rate: f64, seed: u64) -> LoadGenerator {
    LoadGenerator::new(
        LoadProfile {
            floors,
            arrival_rate_per_sec: rate,
            ground_bias:          0.3,
            tick_duration_secs:   2,
        },
        seed,
    )
    .unwrap()
}

/// Feed `ticks` ticks of generated demand into `e`, returning the reports.
fn drive(e: &mut Engine, load_gen: &mut LoadGenerator, ticks: u64) -> Vec<TickReport> {
    (0..ticks)
        .map(|_| {
            for trip in load_gen.generate(e.now()) {
                e.submit_request(trip.origin, trip.destination, trip.at).unwrap();
            }
            e.tick().unwrap()
        })
        .collect()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use lift_core::{ConfigError, DispatchPolicyKind, ElevatorId, Floor, Tick};
    use lift_dispatch::{CarView, Cost, DispatchPolicy, RequestView};

    use super::*;
    use crate::{EngineError, NoopObserver};

    /// Always prefers the highest car id.
    struct HighestId;

    impl DispatchPolicy for HighestId {
        fn score(&self, car: &CarView, _request: &RequestView) -> Option<Cost> {
            Some(Cost::new(0, u32::MAX - car.id.0))
        }
    }

    #[test]
    fn zero_elevators_rejected_at_build() {
        let err = EngineBuilder::new(config(5, 0, 4, 2)).build().err();
        assert_eq!(err, Some(EngineError::InvalidConfiguration(ConfigError::NoElevators)));
    }

    #[test]
    fn bad_config_rejected() {
        assert!(EngineBuilder::new(config(1, 1, 4, 2)).build().is_err());
        assert!(EngineBuilder::new(config(5, 1, 0, 2)).build().is_err());
        let cfg = EngineConfig { start_floor: 5, ..config(5, 1, 4, 2) };
        assert!(EngineBuilder::new(cfg).build().is_err());
    }

    #[test]
    fn cars_start_parked() {
        let cfg = EngineConfig { start_floor: 3, ..config(6, 3, 4, 2) };
        let e = engine(cfg);
        assert_eq!(e.cars().len(), 3);
        assert!(e.cars().iter().all(|c| c.floor() == Floor(3) && c.is_idle()));
        assert!(e.is_quiescent());
        assert_eq!(e.now(), Tick(0));
    }

    #[test]
    fn configured_policy_is_used() {
        let cfg = EngineConfig { dispatch_policy: DispatchPolicyKind::FirstCome, ..config(5, 1, 4, 2) };
        assert_eq!(engine(cfg).policy().name(), "first_come");
    }

    #[test]
    fn custom_policy_plugs_in() {
        let mut e = EngineBuilder::new(config(5, 3, 4, 1)).with_policy(HighestId).build().unwrap();
        let id = e.submit_request(Floor(0), Floor(2), Tick(0)).unwrap();
        e.tick().unwrap();
        assert_eq!(e.request(id).unwrap().assigned, Some(ElevatorId(2)));
        e.run_until_idle(200, &mut NoopObserver).unwrap();
        assert!(e.is_quiescent());
    }
}

// ── Boundary operations ───────────────────────────────────────────────────────

#[cfg(test)]
mod boundary_tests {
    use lift_core::{Direction, ElevatorId, Floor, RequestId, Tick};
    use lift_demand::RequestStatus;

    use super::*;
    use crate::{EngineError, EventKind};

    #[test]
    fn ids_are_sequential() {
        let mut e = engine(config(5, 1, 4, 2));
        assert_eq!(e.submit_request(Floor(0), Floor(3), Tick(0)), Ok(RequestId(0)));
        assert_eq!(e.submit_request(Floor(4), Floor(1), Tick(0)), Ok(RequestId(1)));
    }

    #[test]
    fn invalid_trips_leave_state_untouched() {
        let mut e = engine(config(5, 1, 4, 2));
        assert!(matches!(
            e.submit_request(Floor(5), Floor(1), Tick(0)),
            Err(EngineError::OutOfRange { floor: Floor(5), floors: 5, .. })
        ));
        assert!(matches!(
            e.submit_request(Floor(2), Floor(2), Tick(0)),
            Err(EngineError::OutOfRange { .. })
        ));
        assert!(e.snapshot().pending_requests.is_empty());
        assert!(e.is_quiescent());
        assert_eq!(e.submit_request(Floor(0), Floor(1), Tick(0)), Ok(RequestId(0)));
    }

    #[test]
    fn future_request_waits_for_its_tick() {
        let mut e = engine(config(5, 1, 4, 2));
        let id = e.submit_request(Floor(3), Floor(0), Tick(4)).unwrap();
        assert_eq!(e.snapshot().pending_requests[0].status, RequestStatus::Scheduled);

        for _ in 0..4 {
            let report = e.tick().unwrap();
            assert!(report.is_empty(), "nothing happens before tick 4");
        }
        let report = e.tick().unwrap();
        assert_eq!(report.tick, Tick(4));
        assert!(report.iter().any(|k| matches!(k, EventKind::RequestQueued { request, .. } if *request == id)));
        assert_eq!(e.request(id).unwrap().request_time, Tick(4));
    }

    #[test]
    fn past_times_mean_now() {
        let mut e = engine(config(5, 1, 4, 2));
        e.run_ticks(3, &mut crate::NoopObserver).unwrap();
        let id = e.submit_request(Floor(1), Floor(2), Tick(0)).unwrap();
        assert_eq!(e.request(id).unwrap().request_time, Tick(3));
    }

    #[test]
    fn hall_call_without_passenger() {
        let mut e = engine(config(5, 1, 4, 2));
        assert_eq!(e.press_hall_call(Floor(3), Direction::Down), Ok(true));
        assert_eq!(e.press_hall_call(Floor(3), Direction::Down), Ok(false));
        assert!(e.press_hall_call(Floor(3), Direction::Idle).is_err());
        assert!(e.press_hall_call(Floor(9), Direction::Up).is_err());

        let rec = run_to_idle(&mut e, 100);
        let first = &rec.reports[0];
        assert!(matches!(first.events[0].kind, EventKind::CallRegistered { floor: Floor(3), .. }));
        let cleared = rec.reports.iter().flat_map(|r| r.iter()).any(|k| {
            matches!(k, EventKind::CallCleared { floor: Floor(3), direction: Direction::Down, .. })
        });
        assert!(cleared);
        assert_eq!(e.cars()[0].floor(), Floor(3));
    }

    #[test]
    fn car_button_sends_the_car() {
        let mut e = engine(config(5, 2, 4, 2));
        assert_eq!(e.press_car_button(ElevatorId(1), Floor(4)), Ok(true));
        assert_eq!(e.press_car_button(ElevatorId(7), Floor(4)), Err(EngineError::UnknownCar(ElevatorId(7))));
        assert!(e.press_car_button(ElevatorId(1), Floor(5)).is_err());
        run_to_idle(&mut e, 100);
        assert_eq!(e.cars()[1].floor(), Floor(4));
        assert_eq!(e.cars()[0].floor(), Floor(0));
    }

    #[test]
    fn shutdown_closes_everything() {
        let mut e = engine(config(5, 1, 4, 2));
        let mut rec = Recorder::default();
        e.shutdown_with(&mut rec);
        assert_eq!(rec.shutdown, Some(Tick(0)));
        assert!(!e.shutdown(), "second shutdown is a no-op");

        assert_eq!(e.submit_request(Floor(0), Floor(4), Tick(0)), Err(EngineError::Closed));
        assert_eq!(e.cancel_request(RequestId(0)), Err(EngineError::Closed));
        assert_eq!(e.press_hall_call(Floor(1), Direction::Up), Err(EngineError::Closed));
        assert_eq!(e.tick(), Err(EngineError::Closed));
        assert!(e.requests().is_empty());
        assert!(e.snapshot().closed);
        assert_eq!(rec.events, 0);
    }

    #[test]
    fn run_ticks_drives_observer() {
        let mut e = engine(config(5, 1, 4, 2));
        e.submit_request(Floor(0), Floor(2), Tick(0)).unwrap();
        let mut rec = Recorder::default();
        e.run_ticks(5, &mut rec).unwrap();
        assert_eq!(rec.started, (0..5).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.reports.len(), 5);
        assert_eq!(rec.events, rec.reports.iter().map(|r| r.events.len()).sum::<usize>());
        assert_eq!(e.now(), Tick(5));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use lift_car::{CarEvent, CarState};
    use lift_core::{ElevatorId, Floor, RequestId, Tick};
    use lift_demand::RequestStatus;

    use super::*;
    use crate::EventKind;

    #[test]
    fn single_trip_timing() {
        let cfg = config(5, 1, 4, 2);
        let mut e = engine(cfg.clone());
        let id = e.submit_request(Floor(0), Floor(4), Tick(0)).unwrap();
        let rec = run_to_idle(&mut e, 100);

        let r = e.request(id).unwrap();
        assert_eq!(r.status, RequestStatus::Arrived);
        assert_eq!(r.board_time, Some(Tick(1)));
        assert_eq!(r.arrival_time, Some(Tick(4 + cfg.door_cycle_ticks())));
        assert_eq!(r.arrival_time, Some(cfg.ideal_arrival(Tick(0), 4)));

        let first = &rec.reports[0];
        let kinds: Vec<&str> = first.iter().map(|k| k.name()).collect();
        assert_eq!(
            kinds,
            vec!["request_queued", "call_registered", "request_assigned", "arrived", "state_changed"]
        );
        assert!(matches!(
            first.events[4].kind,
            EventKind::Car { event: CarEvent::StateChanged { to: CarState::DoorsOpening, .. }, .. }
        ));
    }

    #[test]
    fn single_trip_is_deterministic() {
        let run = || {
            let mut e = engine(config(5, 1, 4, 2));
            e.submit_request(Floor(0), Floor(4), Tick(0)).unwrap();
            run_to_idle(&mut e, 100).reports
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn simultaneous_calls_share_the_idle_car() {
        let cfg = EngineConfig { start_floor: 2, ..config(5, 1, 4, 2) };
        let mut e = engine(cfg);
        let up = e.submit_request(Floor(0), Floor(4), Tick(0)).unwrap();
        let down = e.submit_request(Floor(4), Floor(0), Tick(0)).unwrap();

        let report = e.tick().unwrap();
        let assigned: Vec<(RequestId, ElevatorId)> = report
            .iter()
            .filter_map(|k| match *k {
                EventKind::RequestAssigned { request, car } => Some((request, car)),
                _ => None,
            })
            .collect();
        assert_eq!(assigned, vec![(up, ElevatorId(0)), (down, ElevatorId(0))]);

        run_to_idle(&mut e, 200);
        assert_eq!(e.request(up).unwrap().status, RequestStatus::Arrived);
        assert_eq!(e.request(down).unwrap().status, RequestStatus::Arrived);
    }

    #[test]
    fn nearest_idle_car_answers() {
        let mut e = engine(config(10, 2, 4, 2));
        e.press_car_button(ElevatorId(1), Floor(8)).unwrap();
        run_to_idle(&mut e, 100);

        let id = e.submit_request(Floor(7), Floor(2), Tick(0)).unwrap();
        e.tick().unwrap();
        assert_eq!(e.request(id).unwrap().assigned, Some(ElevatorId(1)));
    }

    #[test]
    fn closing_car_does_not_take_a_call_at_its_floor() {
        let mut e = engine(config(10, 2, 4, 2));
        e.press_car_button(ElevatorId(1), Floor(1)).unwrap();
        run_to_idle(&mut e, 100);

        e.submit_request(Floor(0), Floor(9), e.now()).unwrap();
        for _ in 0..20 {
            if e.cars()[0].state() == CarState::DoorsClosing {
                break;
            }
            e.tick().unwrap();
        }
        assert_eq!(e.cars()[0].state(), CarState::DoorsClosing);
        assert_eq!(e.cars()[0].floor(), Floor(0));
        assert!(e.cars()[1].is_idle());

        let late = e.submit_request(Floor(0), Floor(5), e.now()).unwrap();
        e.tick().unwrap();
        assert_eq!(e.request(late).unwrap().assigned, Some(ElevatorId(1)));

        run_to_idle(&mut e, 300);
        let r = e.request(late).unwrap();
        assert_eq!(r.status, RequestStatus::Arrived);
        assert!(r.wait_ticks().unwrap() < 10, "waited {:?}", r.wait_ticks());
    }

    #[test]
    fn idle_car_leaves_both_lamps_to_its_heading() {
        use lift_core::Direction;

        let cfg = EngineConfig { start_floor: 3, ..config(6, 1, 4, 1) };
        let mut e = engine(cfg);
        e.press_hall_call(Floor(3), Direction::Up).unwrap();
        e.press_hall_call(Floor(3), Direction::Down).unwrap();

        let mut cleared = Vec::new();
        while !e.is_quiescent() && e.now() < Tick(100) {
            let report = e.tick().unwrap();
            for kind in report.iter() {
                if let EventKind::CallCleared { floor, direction, car } = *kind {
                    assert_eq!(floor, Floor(3));
                    let heading = e.cars()[car.index()].direction();
                    assert_eq!(heading, direction, "cleared by a car heading {heading}");
                    cleared.push((report.tick, direction));
                }
            }
        }
        assert!(e.is_quiescent());
        assert_eq!(cleared.len(), 2);
        assert!(cleared[0].0 < cleared[1].0, "both lamps went off together: {cleared:?}");
    }

    #[test]
    fn full_car_leaves_the_rest_waiting() {
        let mut e = engine(config(5, 1, 1, 1));
        let a = e.submit_request(Floor(0), Floor(3), Tick(0)).unwrap();
        let b = e.submit_request(Floor(0), Floor(2), Tick(0)).unwrap();
        e.tick().unwrap();
        assert_eq!(e.request(a).unwrap().status, RequestStatus::Assigned);
        assert_eq!(e.request(b).unwrap().status, RequestStatus::Waiting);

        run_to_idle(&mut e, 300);
        let (ra, rb) = (e.request(a).unwrap(), e.request(b).unwrap());
        assert_eq!((ra.status, rb.status), (RequestStatus::Arrived, RequestStatus::Arrived));
        assert!(rb.board_time > ra.arrival_time, "b rides only after a leaves");
    }

    #[test]
    fn every_policy_delivers_everyone() {
        use lift_core::DispatchPolicyKind;

        for policy in [DispatchPolicyKind::NearestCar, DispatchPolicyKind::Scan, DispatchPolicyKind::FirstCome] {
            let cfg = EngineConfig { dispatch_policy: policy, ..config(8, 2, 3, 1) };
            let mut e = engine(cfg);
            let mut load_gen = load(8, 0.15, 21);
            drive(&mut e, &mut load_gen, 150);
            run_to_idle(&mut e, 20_000);
            assert!(
                e.requests().iter().all(|r| r.status == RequestStatus::Arrived),
                "{policy} stranded a passenger"
            );
        }
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cancel_tests {
    use lift_core::{Floor, RequestId, Tick};
    use lift_demand::RequestStatus;

    use super::*;
    use crate::EventKind;

    fn boarded(reports: &[TickReport], id: RequestId) -> bool {
        reports
            .iter()
            .flat_map(|r| r.iter())
            .any(|k| matches!(k, EventKind::Boarded { request, .. } if *request == id))
    }

    #[test]
    fn cancel_before_release() {
        let mut e = engine(config(5, 1, 4, 2));
        let id = e.submit_request(Floor(2), Floor(4), Tick(3)).unwrap();
        assert_eq!(e.cancel_request(id), Ok(true));
        assert_eq!(e.cancel_request(id), Ok(false));
        assert!(!e.snapshot().is_pending(id));

        let rec = run_to_idle(&mut e, 50);
        assert!(!boarded(&rec.reports, id));
        assert_eq!(e.request(id).unwrap().status, RequestStatus::Cancelled);
        assert!(matches!(rec.reports[0].events[0].kind, EventKind::RequestCancelled { .. }));
    }

    #[test]
    fn cancel_in_flight_applies_at_boarding() {
        let mut e = engine(config(5, 1, 4, 2));
        let id = e.submit_request(Floor(4), Floor(0), Tick(0)).unwrap();
        e.tick().unwrap();
        assert_eq!(e.request(id).unwrap().status, RequestStatus::Assigned);

        assert_eq!(e.cancel_request(id), Ok(true));
        assert_eq!(e.cancel_request(id), Ok(false));
        assert!(!e.snapshot().is_pending(id));

        let rec = run_to_idle(&mut e, 100);
        assert!(!boarded(&rec.reports, id));
        assert_eq!(e.request(id).unwrap().status, RequestStatus::Cancelled);
        // The car still made the trip it was sent on.
        assert_eq!(e.cars()[0].floor(), Floor(4));
        assert!(rec.reports.iter().all(|r| !r.iter().any(|k| matches!(k, EventKind::Alighted { .. }))));
    }

    #[test]
    fn cancelling_the_last_in_line_darkens_the_lamp() {
        use lift_car::CarEvent;
        use lift_core::Direction;

        let mut e = engine(config(10, 1, 1, 1));
        let rider = e.submit_request(Floor(0), Floor(9), Tick(0)).unwrap();
        let waiting = e.submit_request(Floor(6), Floor(8), Tick(0)).unwrap();
        e.tick().unwrap();
        assert_eq!(e.request(waiting).unwrap().status, RequestStatus::Waiting);
        assert!(e.calls().is_pending(Floor(6), Direction::Up));

        assert_eq!(e.cancel_request(waiting), Ok(true));
        assert!(!e.calls().is_pending(Floor(6), Direction::Up));

        let rec = run_to_idle(&mut e, 200);
        let first: Vec<&str> = rec.reports[0].iter().map(|k| k.name()).collect();
        assert_eq!(&first[..2], ["request_cancelled", "call_withdrawn"]);
        let stopped_at_6 = rec.reports.iter().flat_map(|r| r.iter()).any(|k| {
            matches!(k, EventKind::Car { event: CarEvent::Arrived { floor: Floor(6) }, .. })
        });
        assert!(!stopped_at_6, "car stopped for an empty landing");
        assert_eq!(e.request(rider).unwrap().status, RequestStatus::Arrived);
    }

    #[test]
    fn lamp_pressed_by_hand_survives_a_cancel() {
        use lift_core::Direction;

        let mut e = engine(config(10, 1, 1, 1));
        e.submit_request(Floor(0), Floor(9), Tick(0)).unwrap();
        let waiting = e.submit_request(Floor(6), Floor(8), Tick(0)).unwrap();
        e.tick().unwrap();
        e.press_hall_call(Floor(6), Direction::Up).unwrap();
        e.cancel_request(waiting).unwrap();
        assert!(e.calls().is_pending(Floor(6), Direction::Up));

        run_to_idle(&mut e, 200);
        assert!(e.calls().is_empty());
    }

    #[test]
    fn cannot_cancel_after_boarding_or_unknown() {
        let mut e = engine(config(5, 1, 4, 2));
        let id = e.submit_request(Floor(0), Floor(4), Tick(0)).unwrap();
        e.run_ticks(2, &mut crate::NoopObserver).unwrap();
        assert_eq!(e.request(id).unwrap().status, RequestStatus::Boarded);
        assert_eq!(e.cancel_request(id), Ok(false));
        assert_eq!(e.cancel_request(RequestId(99)), Ok(false));
    }
}

// ── Invariants under load ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariant_tests {
    use std::collections::HashSet;

    use lift_car::CarState;
    use lift_core::Direction;
    use lift_demand::RequestStatus;

    use super::*;
    use crate::EventKind;

    fn check_tick(e: &Engine, report: &TickReport) {
        let mut riding = HashSet::new();
        for car in e.cars() {
            assert!(car.load() <= car.capacity(), "{} over capacity", car.id());
            for p in car.onboard() {
                assert!(riding.insert(p.request), "{} is in two cars", p.request);
            }
        }
        for kind in report.iter() {
            if let EventKind::CallCleared { floor, direction, car } = *kind {
                let c = &e.cars()[car.index()];
                assert_eq!(c.floor(), floor);
                assert_eq!(c.state(), CarState::DoorsOpen);
                if c.direction() == Direction::Idle {
                    assert!(
                        !e.calls().is_pending(floor, direction.opposite()),
                        "idle {car} cleared {floor} {direction} with the other lamp lit"
                    );
                } else {
                    assert_eq!(c.direction(), direction);
                }
            }
            if let EventKind::Car { event: lift_car::CarEvent::Moved { from, to }, .. } = *kind {
                assert_eq!(from.distance(to), 1);
            }
        }
    }

    #[test]
    fn invariants_hold_under_load() {
        let mut e = engine(config(12, 3, 4, 1));
        let mut load_gen = load(12, 0.1, 11);
        for _ in 0..400 {
            for trip in load_gen.generate(e.now()) {
                e.submit_request(trip.origin, trip.destination, trip.at).unwrap();
            }
            let report = e.tick().unwrap();
            check_tick(&e, &report);
        }
        while !e.is_quiescent() && e.now() < Tick(20_000) {
            let report = e.tick().unwrap();
            check_tick(&e, &report);
        }
        assert!(e.is_quiescent());
        assert!(e.requests().len() > 20);

        for r in e.requests().iter() {
            assert_eq!(r.status, RequestStatus::Arrived);
            let (b, a) = (r.board_time.unwrap(), r.arrival_time.unwrap());
            assert!(r.request_time <= b && b <= a);
            assert!(a.since(b) > u64::from(r.floors()), "{} rode faster than the shaft allows", r.id);
        }
    }

    #[test]
    fn identical_inputs_identical_traces() {
        let trace = || {
            let mut e = engine(config(10, 3, 4, 2));
            let mut load_gen = load(10, 0.2, 77);
            drive(&mut e, &mut load_gen, 300)
        };
        assert_eq!(trace(), trace());
    }

    #[test]
    fn snapshot_reports_activity() {
        let mut e = engine(config(10, 3, 4, 2));
        e.submit_request(Floor(0), Floor(9), Tick(0)).unwrap();
        e.tick().unwrap();
        let snap = e.snapshot();
        assert_eq!(snap.tick, Tick(1));
        assert_eq!(snap.active_cars(), 1);
        assert_eq!(snap.idle_cars(), 2);
        assert_eq!(snap.pending_requests.len(), 1);
        assert_eq!(snap.calls.len(), 1);

        run_to_idle(&mut e, 200);
        let snap = e.snapshot();
        assert_eq!(snap.delivered, 1);
        assert!(snap.pending_requests.is_empty() && snap.calls.is_empty());
        assert_eq!(snap.elevators[0].floors_travelled, 9);
    }
}

// ── SharedEngine ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod shared_tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use lift_core::{Direction, ElevatorId, Floor, Tick};
    use lift_demand::RequestStatus;

    use super::*;
    use crate::{EngineError, EventKind, NoopObserver, SharedEngine};

    fn shared() -> SharedEngine {
        EngineBuilder::new(config(10, 2, 6, 1)).build_shared().unwrap()
    }

    /// Ticks at least once so the inbox is drained.
    fn tick_until_idle(s: &SharedEngine, max: u64) {
        for _ in 0..max {
            s.tick().unwrap();
            if s.with_engine(|e| e.is_quiescent()) {
                return;
            }
        }
        panic!("still busy after {max} ticks");
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn check<T: Send + Sync + Clone>() {}
        check::<SharedEngine>();
    }

    #[test]
    fn concurrent_producers_get_unique_ids() {
        let s = shared();
        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let s = s.clone();
                thread::spawn(move || {
                    (0..25u32)
                        .map(|i| {
                            let origin = Floor((t + i) % 10);
                            let destination = Floor((t + i + 3) % 10);
                            s.submit_request(origin, destination, Tick(0)).unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let ids: Vec<_> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 100);

        tick_until_idle(&s, 20_000);
        s.with_engine(|e| {
            assert_eq!(e.requests().len(), 100);
            assert!(e.requests().iter().all(|r| r.status == RequestStatus::Arrived));
        });
        assert_eq!(s.snapshot().delivered, 100);
    }

    #[test]
    fn second_tick_is_refused_while_one_runs() {
        let s = shared();
        let nested = s.with_engine(|_| s.tick());
        assert_eq!(nested, Err(EngineError::TickInProgress));
        assert!(s.tick().is_ok());
    }

    #[test]
    fn concurrent_tickers_never_overlap() {
        let s = shared();
        s.submit_request(Floor(0), Floor(9), Tick(0)).unwrap();
        let ran: usize = (0..4)
            .map(|_| {
                let s = s.clone();
                thread::spawn(move || {
                    (0..50)
                        .filter(|_| match s.tick() {
                            Ok(_) => true,
                            Err(EngineError::TickInProgress) => false,
                            Err(e) => panic!("unexpected {e}"),
                        })
                        .count()
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .sum();
        assert_eq!(s.snapshot().tick, Tick(ran as u64));
    }

    #[test]
    fn cancel_from_inbox_matches_engine() {
        let mut direct = engine(config(10, 2, 6, 1));
        let id = direct.submit_request(Floor(0), Floor(5), Tick(0)).unwrap();
        assert_eq!(direct.cancel_request(id), Ok(true));
        let expected = direct.tick().unwrap();
        assert!(matches!(expected.events[0].kind, EventKind::RequestCancelled { .. }));

        let s = shared();
        let sid = s.submit_request(Floor(0), Floor(5), Tick(0)).unwrap();
        assert_eq!(sid, id);
        assert_eq!(s.cancel_request(sid), Ok(true));
        assert_eq!(s.cancel_request(sid), Ok(false));
        assert_eq!(s.tick().unwrap(), expected);

        assert_eq!(s.snapshot().cancelled, direct.snapshot().cancelled);
        assert_eq!(s.snapshot().cancelled, 1);
        s.with_engine(|e| assert_eq!(e.request(sid).unwrap().status, RequestStatus::Cancelled));
    }

    #[test]
    fn cancel_after_drain_goes_to_engine() {
        let s = shared();
        let id = s.submit_request(Floor(6), Floor(1), Tick(0)).unwrap();
        s.tick().unwrap();
        assert_eq!(s.cancel_request(id), Ok(true));
        assert!(s.snapshot().is_pending(id), "published before the cancel");
        tick_until_idle(&s, 200);
        s.with_engine(|e| assert_eq!(e.request(id).unwrap().status, RequestStatus::Cancelled));
    }

    #[test]
    fn snapshot_is_published_per_tick() {
        let s = shared();
        let before: Arc<_> = s.snapshot();
        s.press_hall_call(Floor(4), Direction::Up).unwrap();
        s.press_car_button(ElevatorId(1), Floor(7)).unwrap();
        assert_eq!(s.press_car_button(ElevatorId(5), Floor(7)), Err(EngineError::UnknownCar(ElevatorId(5))));
        assert!(s.press_hall_call(Floor(4), Direction::Idle).is_err());

        let report = s.tick().unwrap();
        assert!(report.iter().any(|k| matches!(k, EventKind::CallRegistered { floor: Floor(4), .. })));
        let after = s.snapshot();
        assert_eq!(before.tick, Tick(0));
        assert_eq!(after.tick, Tick(1));
        assert_eq!(after.active_cars(), 2);
    }

    #[test]
    fn shutdown_rejects_producers() {
        let s = shared();
        s.submit_request(Floor(0), Floor(3), Tick(0)).unwrap();
        assert!(s.shutdown());
        assert!(!s.shutdown());
        assert_eq!(s.submit_request(Floor(0), Floor(3), Tick(0)), Err(EngineError::Closed));
        assert_eq!(s.tick(), Err(EngineError::Closed));
        assert!(s.snapshot().closed);
        s.with_engine(|e| assert!(e.requests().is_empty(), "inbox discarded"));
    }

    #[test]
    fn run_paced_forwards_events() {
        let s = shared();
        s.submit_request(Floor(0), Floor(2), Tick(0)).unwrap();
        s.run_paced(3, Duration::ZERO, &mut NoopObserver).unwrap();
        assert_eq!(s.snapshot().tick, Tick(3));
    }
}
