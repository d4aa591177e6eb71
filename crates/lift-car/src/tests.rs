//! Unit tests for lift-car.

use lift_building::FloorQueues;
use lift_core::{Direction, ElevatorId, EngineConfig, Floor, RequestId, Tick};
use lift_demand::{Request, RequestStore};

use crate::{CarState, Elevator, StopOrdering};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config() -> EngineConfig {
    EngineConfig {
        floors:                5,
        elevators:             1,
        capacity_per_elevator: 2,
        door_dwell_ticks:      2,
        ..Default::default()
    }
}

fn car() -> Elevator {
    Elevator::new(ElevatorId(0), &config(), StopOrdering::Sweep)
}

/// Put an assigned passenger for car 0 on the landing.
fn waiting(
    store:  &mut RequestStore,
    queues: &mut FloorQueues,
    id:     u64,
    origin: u32,
    dest:   u32,
) {
    let mut r = Request::new(RequestId(id), Floor(origin), Floor(dest), Tick(0)).unwrap();
    r.release();
    r.assign(ElevatorId(0));
    queues.push(r.origin, r.direction(), r.id);
    store.insert(r);
}

/// Step until the doors are open at the car's floor.
fn open_here(car: &mut Elevator) {
    car.request_stop(car.floor()).unwrap();
    car.step();
    car.step();
    assert_eq!(car.state(), CarState::DoorsOpen);
}

// ── StopQueue ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stop_queue {
    use lift_core::{Direction, Floor};

    use crate::{StopOrdering, StopQueue};

    #[test]
    fn fifo_keeps_request_order() {
        let mut q = StopQueue::new(StopOrdering::Fifo);
        assert!(q.insert(Floor(4), Floor(0), Direction::Up));
        assert!(q.insert(Floor(1), Floor(0), Direction::Up));
        assert!(q.insert(Floor(3), Floor(0), Direction::Up));
        assert!(!q.insert(Floor(1), Floor(0), Direction::Up));
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![Floor(4), Floor(1), Floor(3)]);
    }

    #[test]
    fn sweep_serves_ahead_then_behind() {
        let mut q = StopQueue::new(StopOrdering::Sweep);
        for f in [0, 4, 2, 3] {
            q.insert(Floor(f), Floor(1), Direction::Up);
        }
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![Floor(2), Floor(3), Floor(4), Floor(0)]);
        assert_eq!(q.last_ahead(Floor(1), Direction::Up), Some(Floor(4)));

        q.reorder(Floor(1), Direction::Down);
        assert_eq!(q.front(), Some(Floor(0)));
    }

    #[test]
    fn idle_sweep_is_nearest_first() {
        let mut q = StopQueue::new(StopOrdering::Sweep);
        for f in [4, 0, 3] {
            q.insert(Floor(f), Floor(2), Direction::Idle);
        }
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![Floor(3), Floor(0), Floor(4)]);
    }

    #[test]
    fn remove_and_ahead() {
        let mut q = StopQueue::new(StopOrdering::Sweep);
        q.insert(Floor(3), Floor(1), Direction::Up);
        assert!(q.any_ahead(Floor(1), Direction::Up));
        assert!(!q.any_ahead(Floor(1), Direction::Down));
        assert!(q.remove(Floor(3)));
        assert!(!q.remove(Floor(3)));
        assert!(q.is_empty());
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod state_machine {
    use super::*;
    use crate::{CarError, CarEvent, DoorState};

    #[test]
    fn new_car_is_parked() {
        let c = car();
        assert_eq!(c.floor(), Floor(0));
        assert_eq!(c.state(), CarState::Idle);
        assert_eq!(c.door_state(), DoorState::Closed);
        assert!(c.is_idle());
    }

    #[test]
    fn out_of_range_stop_rejected() {
        let mut c = car();
        assert_eq!(
            c.request_stop(Floor(5)),
            Err(CarError::OutOfRange { car: ElevatorId(0), floor: Floor(5), floors: 5 })
        );
        assert!(c.stops().is_empty());
    }

    #[test]
    fn door_cycle_at_current_floor() {
        let mut c = car();
        c.request_stop(Floor(0)).unwrap();
        let mut states = Vec::new();
        for _ in 0..config().door_cycle_ticks() + 1 {
            c.step();
            states.push(c.state());
        }
        assert_eq!(
            states,
            vec![
                CarState::DoorsOpening,
                CarState::DoorsOpen,
                CarState::DoorsOpen,
                CarState::DoorsOpen,
                CarState::DoorsClosing,
                CarState::Idle,
            ]
        );
        assert_eq!(c.stops_made(), 1);
    }

    #[test]
    fn moves_one_floor_per_tick() {
        let mut c = car();
        c.request_stop(Floor(3)).unwrap();

        let first = c.step();
        assert_eq!(first[0], CarEvent::Departed { floor: Floor(0), direction: Direction::Up });
        assert!(first.contains(&CarEvent::Moved { from: Floor(0), to: Floor(1) }));
        assert_eq!(c.state(), CarState::MovingUp);

        c.step();
        assert_eq!(c.floor(), Floor(2));
        let last = c.step();
        assert_eq!(c.floor(), Floor(3));
        assert!(last.contains(&CarEvent::Arrived { floor: Floor(3) }));
        assert_eq!(c.state(), CarState::DoorsOpening);
        assert_eq!(c.floors_travelled(), 3);
    }

    #[test]
    fn passing_stop_is_served() {
        let mut c = car();
        c.request_stop(Floor(4)).unwrap();
        c.step(); // at 1
        c.request_stop(Floor(2)).unwrap();
        c.step();
        assert_eq!(c.floor(), Floor(2));
        assert_eq!(c.state(), CarState::DoorsOpening);
        assert_eq!(c.stops().iter().collect::<Vec<_>>(), vec![Floor(4)]);
    }

    #[test]
    fn doors_held_until_dwell_runs_out() {
        let mut c = car();
        assert!(!c.holding_doors());
        c.request_stop(Floor(0)).unwrap();
        let mut held = Vec::new();
        for _ in 0..config().door_cycle_ticks() + 1 {
            c.step();
            held.push((c.state(), c.holding_doors()));
        }
        assert_eq!(
            held,
            vec![
                (CarState::DoorsOpening, true),
                (CarState::DoorsOpen, true),
                (CarState::DoorsOpen, true),
                (CarState::DoorsOpen, false),
                (CarState::DoorsClosing, false),
                (CarState::Idle, false),
            ]
        );
    }

    #[test]
    fn stop_at_open_floor_is_ignored() {
        let mut c = car();
        open_here(&mut c);
        assert_eq!(c.request_stop(Floor(0)), Ok(false));
        assert!(c.stops().is_empty());
    }

    #[test]
    fn closing_car_heads_for_next_stop() {
        let mut c = car();
        open_here(&mut c);
        c.request_stop(Floor(2)).unwrap();
        c.step();
        c.step();
        c.step();
        assert_eq!(c.state(), CarState::DoorsClosing);
        c.step();
        assert_eq!(c.state(), CarState::MovingUp);
        assert_eq!(c.floor(), Floor(1));
    }

    #[test]
    fn reverses_when_nothing_ahead() {
        let mut c = car();
        c.request_stop(Floor(3)).unwrap();
        c.step();
        c.step(); // at 2, heading up
        c.set_direction(Direction::Up);
        c.request_stop(Floor(0)).unwrap();
        c.step(); // reaches 3
        assert_eq!(c.state(), CarState::DoorsOpening);
        for _ in 0..config().door_cycle_ticks() - 1 {
            c.step();
        }
        assert_eq!(c.state(), CarState::DoorsClosing);
        c.resolve_direction(false, false);
        c.step();
        assert_eq!(c.state(), CarState::MovingDown);
        assert_eq!(c.floor(), Floor(2));
    }
}

// ── Direction at a stop ───────────────────────────────────────────────────────

#[cfg(test)]
mod direction_rules {
    use super::*;

    #[test]
    fn keeps_heading_while_stops_ahead() {
        let mut c = car();
        c.request_stop(Floor(4)).unwrap();
        c.step();
        c.request_stop(Floor(2)).unwrap();
        c.step();
        assert_eq!(c.resolve_direction(false, true), Direction::Up);
    }

    #[test]
    fn follows_waiting_passengers_same_way_first() {
        let mut c = car();
        assert_eq!(c.resolve_direction(true, true), Direction::Up);
        c.set_direction(Direction::Down);
        assert_eq!(c.resolve_direction(true, true), Direction::Down);
        assert_eq!(c.resolve_direction(true, false), Direction::Up);
    }

    #[test]
    fn falls_back_to_next_stop_then_idle() {
        let mut c = Elevator::new(
            ElevatorId(0),
            &EngineConfig { start_floor: 3, ..config() },
            StopOrdering::Sweep,
        );
        c.request_stop(Floor(1)).unwrap();
        assert_eq!(c.resolve_direction(false, false), Direction::Down);

        let mut empty = car();
        empty.set_direction(Direction::Down);
        assert_eq!(empty.resolve_direction(false, false), Direction::Idle);
    }
}

// ── Boarding & alighting ──────────────────────────────────────────────────────

#[cfg(test)]
mod passengers {
    use lift_demand::RequestStatus;

    use super::*;

    #[test]
    fn board_refused_with_doors_closed() {
        let mut c = car();
        let (mut store, mut queues) = (RequestStore::new(), FloorQueues::new(5));
        waiting(&mut store, &mut queues, 1, 0, 3);
        let out = c.board_if_present_at(Floor(0), &mut queues, &mut store, Tick(0));
        assert!(out.is_empty());
        assert_eq!(store.status(RequestId(1)), Some(RequestStatus::Assigned));
    }

    #[test]
    fn capacity_defers_extra_passengers() {
        let mut c = car();
        let (mut store, mut queues) = (RequestStore::new(), FloorQueues::new(5));
        for id in 1..=3 {
            waiting(&mut store, &mut queues, id, 0, 2 + (id as u32 % 2));
        }
        open_here(&mut c);
        c.resolve_direction(true, false);
        let out = c.board_if_present_at(Floor(0), &mut queues, &mut store, Tick(1));

        assert_eq!(out.boarded, vec![RequestId(1), RequestId(2)]);
        assert_eq!(out.deferred, vec![RequestId(3)]);
        assert_eq!(c.load(), 2);
        assert!(c.is_full());
        let r3 = store.get(RequestId(3)).unwrap();
        assert_eq!((r3.status, r3.assigned), (RequestStatus::Waiting, None));
        assert_eq!(queues.count(Floor(0), Direction::Up), 1, "deferred passenger stays in line");
        assert!(c.stops().contains(Floor(2)) && c.stops().contains(Floor(3)));
    }

    #[test]
    fn others_passengers_are_left_alone() {
        let mut c = car();
        let (mut store, mut queues) = (RequestStore::new(), FloorQueues::new(5));
        let mut r = Request::new(RequestId(9), Floor(0), Floor(4), Tick(0)).unwrap();
        r.release();
        r.assign(ElevatorId(1));
        queues.push(Floor(0), Direction::Up, r.id);
        store.insert(r);

        open_here(&mut c);
        c.resolve_direction(true, false);
        assert!(c.board_if_present_at(Floor(0), &mut queues, &mut store, Tick(1)).is_empty());
        assert_eq!(store.get(RequestId(9)).unwrap().assigned, Some(ElevatorId(1)));
    }

    #[test]
    fn opposite_heading_defers() {
        let mut c = Elevator::new(
            ElevatorId(0),
            &EngineConfig { start_floor: 2, ..config() },
            StopOrdering::Sweep,
        );
        let (mut store, mut queues) = (RequestStore::new(), FloorQueues::new(5));
        waiting(&mut store, &mut queues, 1, 2, 0);
        open_here(&mut c);
        c.request_stop(Floor(4)).unwrap();
        c.set_direction(Direction::Up);
        assert_eq!(c.resolve_direction(false, true), Direction::Up);

        let out = c.board_if_present_at(Floor(2), &mut queues, &mut store, Tick(1));
        assert_eq!(out.deferred, vec![RequestId(1)]);
        assert_eq!(store.status(RequestId(1)), Some(RequestStatus::Waiting));
    }

    #[test]
    fn cancel_pending_is_applied_at_boarding() {
        let mut c = car();
        let (mut store, mut queues) = (RequestStore::new(), FloorQueues::new(5));
        waiting(&mut store, &mut queues, 1, 0, 3);
        store.get_mut(RequestId(1)).unwrap().cancel_pending = true;
        open_here(&mut c);
        c.resolve_direction(true, false);

        let out = c.board_if_present_at(Floor(0), &mut queues, &mut store, Tick(1));
        assert_eq!(out.cancelled, vec![RequestId(1)]);
        assert_eq!(store.status(RequestId(1)), Some(RequestStatus::Cancelled));
        assert!(queues.is_empty());
        assert_eq!(c.load(), 0);
    }

    #[test]
    fn full_ride_timing() {
        let cfg = config();
        let mut c = car();
        let (mut store, mut queues) = (RequestStore::new(), FloorQueues::new(5));
        waiting(&mut store, &mut queues, 1, 0, 3);
        c.request_stop(Floor(0)).unwrap();

        for t in 0..=8 {
            let now = Tick(t);
            c.step();
            if c.state() == CarState::DoorsOpen {
                let up = queues.count(c.floor(), Direction::Up) > 0;
                let down = queues.count(c.floor(), Direction::Down) > 0;
                c.resolve_direction(up, down);
                c.alight_at(c.floor(), &mut store, now);
                c.board_if_present_at(c.floor(), &mut queues, &mut store, now);
            }
        }

        let r = store.get(RequestId(1)).unwrap();
        assert_eq!(r.status, RequestStatus::Arrived);
        assert_eq!(r.board_time, Some(Tick(1)));
        assert_eq!(r.arrival_time, Some(Tick(8)));
        assert_eq!(r.arrival_time, Some(cfg.ideal_arrival(Tick(0), 3)));
        assert_eq!(c.load(), 0);
        assert_eq!(c.direction(), Direction::Idle);
    }
}
