//! `ArrivalQueue` — requests submitted ahead of time.
//!
//! A request submitted with `at > now` is stored here and released onto its
//! landing when the engine reaches that tick.  The queue only holds ids; the
//! full record lives in the `RequestStore` with status `Scheduled`.
//!
//! `BTreeMap` gives O(log W) insert and pop where W = number of distinct
//! release ticks currently enqueued.

use std::collections::BTreeMap;

use lift_core::{RequestId, Tick};

/// Maps simulation ticks → requests that reach their landing at that tick.
#[derive(Default, Clone, Debug)]
pub struct ArrivalQueue {
    inner: BTreeMap<Tick, Vec<RequestId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl ArrivalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `request` to be released at `tick`.
    pub fn push(&mut self, tick: Tick, request: RequestId) {
        self.inner.entry(tick).or_default().push(request);
        self.total += 1;
    }

    /// Remove and return every request due at or before `now`, earliest tick
    /// first, submission order within a tick.
    pub fn drain_due(&mut self, now: Tick) -> Vec<RequestId> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let released: Vec<RequestId> = due.into_values().flatten().collect();
        self.total -= released.len();
        released
    }

    /// Drop `request` wherever it is queued.  Returns `true` if it was found.
    pub fn remove(&mut self, request: RequestId) -> bool {
        let mut emptied = None;
        let mut found = false;
        for (tick, ids) in self.inner.iter_mut() {
            if let Some(pos) = ids.iter().position(|&r| r == request) {
                ids.remove(pos);
                found = true;
                if ids.is_empty() {
                    emptied = Some(*tick);
                }
                break;
            }
        }
        if let Some(tick) = emptied {
            self.inner.remove(&tick);
        }
        if found {
            self.total -= 1;
        }
        found
    }

    /// The earliest tick with at least one queued request.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
