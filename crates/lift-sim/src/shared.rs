//! `SharedEngine` — a thread-safe handle around an [`Engine`].
//!
//! Two locks, never held together while cars move:
//!
//! - the **boundary** lock guards the inbox (submissions with their
//!   pre-allocated ids, button presses), the request id counter, the closed
//!   flag, and the latest published snapshot.  Producers only ever take this
//!   one, and only briefly.
//! - the **engine** lock guards the engine itself.  `tick` takes it with
//!   `try_lock`, so a second concurrent `tick` is refused rather than queued.
//!
//! A tick drains the inbox into the engine, runs, and publishes a fresh
//! `Arc<EngineSnapshot>`; readers clone the `Arc` and never wait for a tick.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::time::Duration;

use lift_core::{Direction, ElevatorId, EngineConfig, Floor, RequestId, Tick};
use lift_dispatch::{BuiltinPolicy, DispatchPolicy};

use crate::engine::{check_call, check_floor, check_trip};
use crate::{Engine, EngineError, EngineResult, EngineSnapshot, SimObserver, TickReport};

struct Submission {
    id:          RequestId,
    origin:      Floor,
    destination: Floor,
    at:          Tick,
    /// Withdrawn before the engine saw it.  Still handed over, then
    /// cancelled there, so the request and its event exist as on [`Engine`].
    cancelled:   bool,
}

struct Inbox {
    submissions: Vec<Submission>,
    hall_calls:  Vec<(Floor, Direction)>,
    car_buttons: Vec<(ElevatorId, Floor)>,
    next_id:     u64,
    closed:      bool,
    published:   Arc<EngineSnapshot>,
}

struct Shared<P: DispatchPolicy> {
    config:   EngineConfig,
    boundary: Mutex<Inbox>,
    engine:   Mutex<Engine<P>>,
}

/// Cheaply clonable, `Send + Sync` handle to one engine.
///
/// Offers the same boundary operations as [`Engine`]; submissions and button
/// presses are validated immediately and take effect at the next tick.
pub struct SharedEngine<P: DispatchPolicy = BuiltinPolicy> {
    inner: Arc<Shared<P>>,
}

impl<P: DispatchPolicy> Clone for SharedEngine<P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

/// Recover from a thread that panicked while holding `m`.
///
/// The inbox is only changed after validation, so it is always whole.  The
/// engine is not: a policy that panics inside `tick` leaves that tick half
/// applied (requests released, their events lost), and later ticks carry on
/// from there.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<P: DispatchPolicy> SharedEngine<P> {
    pub fn new(engine: Engine<P>) -> Self {
        let inbox = Inbox {
            submissions: Vec::new(),
            hall_calls:  Vec::new(),
            car_buttons: Vec::new(),
            next_id:     engine.next_request_id(),
            closed:      engine.is_closed(),
            published:   Arc::new(engine.snapshot()),
        };
        Self {
            inner: Arc::new(Shared {
                config:   engine.config().clone(),
                boundary: Mutex::new(inbox),
                engine:   Mutex::new(engine),
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// See [`Engine::submit_request`].  The id is final; the request joins
    /// the engine at the next tick.
    pub fn submit_request(
        &self,
        origin:      Floor,
        destination: Floor,
        at:          Tick,
    ) -> EngineResult<RequestId> {
        let mut inbox = lock(&self.inner.boundary);
        if inbox.closed {
            return Err(EngineError::Closed);
        }
        check_trip(&self.inner.config, origin, destination)?;
        let id = RequestId(inbox.next_id);
        inbox.next_id += 1;
        inbox.submissions.push(Submission { id, origin, destination, at, cancelled: false });
        Ok(id)
    }

    /// See [`Engine::cancel_request`].
    ///
    /// A request still in the inbox is marked and cancelled as the next tick
    /// drains it, with its `RequestCancelled` event in that tick's report.
    /// Otherwise the cancellation waits for any running tick to finish.
    pub fn cancel_request(&self, id: RequestId) -> EngineResult<bool> {
        {
            let mut inbox = lock(&self.inner.boundary);
            if inbox.closed {
                return Err(EngineError::Closed);
            }
            if let Some(s) = inbox.submissions.iter_mut().find(|s| s.id == id) {
                return Ok(!std::mem::replace(&mut s.cancelled, true));
            }
        }
        lock(&self.inner.engine).cancel_request(id)
    }

    /// See [`Engine::press_hall_call`].  Applied at the next tick.
    pub fn press_hall_call(&self, floor: Floor, direction: Direction) -> EngineResult<()> {
        let mut inbox = lock(&self.inner.boundary);
        if inbox.closed {
            return Err(EngineError::Closed);
        }
        check_call(&self.inner.config, floor, direction)?;
        inbox.hall_calls.push((floor, direction));
        Ok(())
    }

    /// See [`Engine::press_car_button`].  Applied at the next tick.
    pub fn press_car_button(&self, car: ElevatorId, floor: Floor) -> EngineResult<()> {
        let mut inbox = lock(&self.inner.boundary);
        if inbox.closed {
            return Err(EngineError::Closed);
        }
        if car.0 >= self.inner.config.elevators {
            return Err(EngineError::UnknownCar(car));
        }
        check_floor(&self.inner.config, floor)?;
        inbox.car_buttons.push((car, floor));
        Ok(())
    }

    /// Drain the inbox, run one tick, publish the new snapshot.
    ///
    /// Fails with [`EngineError::TickInProgress`] if another thread is
    /// mid-tick.
    pub fn tick(&self) -> EngineResult<TickReport> {
        let mut engine = match self.inner.engine.try_lock() {
            Ok(guard)                       => guard,
            Err(TryLockError::WouldBlock)   => return Err(EngineError::TickInProgress),
            Err(TryLockError::Poisoned(p))  => p.into_inner(),
        };

        let (submissions, hall_calls, car_buttons) = {
            let mut inbox = lock(&self.inner.boundary);
            if inbox.closed {
                return Err(EngineError::Closed);
            }
            (
                std::mem::take(&mut inbox.submissions),
                std::mem::take(&mut inbox.hall_calls),
                std::mem::take(&mut inbox.car_buttons),
            )
        };

        for s in &submissions {
            engine.accept(s.id, s.origin, s.destination, s.at)?;
        }
        for s in submissions.iter().filter(|s| s.cancelled) {
            engine.cancel_request(s.id)?;
        }
        for (floor, direction) in hall_calls {
            engine.press_hall_call(floor, direction)?;
        }
        for (car, floor) in car_buttons {
            engine.press_car_button(car, floor)?;
        }

        let report = engine.tick()?;
        let snapshot = Arc::new(engine.snapshot());
        lock(&self.inner.boundary).published = snapshot;
        Ok(report)
    }

    /// The snapshot published by the last tick.
    pub fn snapshot(&self) -> Arc<EngineSnapshot> {
        Arc::clone(&lock(&self.inner.boundary).published)
    }

    /// Close the engine.  Submissions still in the inbox are discarded.
    /// Returns `false` if already shut down.
    pub fn shutdown(&self) -> bool {
        {
            let mut inbox = lock(&self.inner.boundary);
            if inbox.closed {
                return false;
            }
            inbox.closed = true;
            inbox.submissions.clear();
            inbox.hall_calls.clear();
            inbox.car_buttons.clear();
        }
        let mut engine = lock(&self.inner.engine);
        engine.shutdown();
        let snapshot = Arc::new(engine.snapshot());
        lock(&self.inner.boundary).published = snapshot;
        true
    }

    /// Read-only access to the engine, waiting for any running tick.
    pub fn with_engine<R>(&self, f: impl FnOnce(&Engine<P>) -> R) -> R {
        f(&lock(&self.inner.engine))
    }

    /// Tick `ticks` times, sleeping `period` between ticks, forwarding
    /// events to `observer`.  A zero period runs flat out.
    pub fn run_paced<O: SimObserver>(
        &self,
        ticks:    u64,
        period:   Duration,
        observer: &mut O,
    ) -> EngineResult<()> {
        for _ in 0..ticks {
            observer.on_tick_start(self.snapshot().tick);
            let report = self.tick()?;
            for event in &report.events {
                observer.on_event(event);
            }
            observer.on_tick_end(&report);
            if !period.is_zero() {
                std::thread::sleep(period);
            }
        }
        Ok(())
    }
}
