//! `RequestStore` — every request the engine has accepted.
//!
//! Requests are never removed: terminal records stay so metrics and
//! snapshots can report them.  A `BTreeMap` keeps iteration in ascending
//! `RequestId` order, which is the order the engine resolves requests in.

use std::collections::BTreeMap;

use lift_core::{ElevatorId, RequestId};

use crate::{Request, RequestStatus};

#[derive(Clone, Debug, Default)]
pub struct RequestStore {
    requests: BTreeMap<RequestId, Request>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request.  Returns `false` (and keeps the old record) if the id
    /// is already present.
    pub fn insert(&mut self, request: Request) -> bool {
        match self.requests.entry(request.id) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(v) => {
                v.insert(request);
                true
            }
        }
    }

    #[inline]
    pub fn get(&self, id: RequestId) -> Option<&Request> {
        self.requests.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: RequestId) -> Option<&mut Request> {
        self.requests.get_mut(&id)
    }

    #[inline]
    pub fn status(&self, id: RequestId) -> Option<RequestStatus> {
        self.requests.get(&id).map(|r| r.status)
    }

    /// All requests in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.values()
    }

    /// Ids of requests with `status`, ascending.
    pub fn ids_with(&self, status: RequestStatus) -> Vec<RequestId> {
        self.requests
            .values()
            .filter(|r| r.status == status)
            .map(|r| r.id)
            .collect()
    }

    /// Requests assigned to `car` and still waiting to board.
    pub fn assigned_to(&self, car: ElevatorId) -> impl Iterator<Item = &Request> {
        self.requests
            .values()
            .filter(move |r| r.status == RequestStatus::Assigned && r.assigned == Some(car))
    }

    /// Requests that have not yet boarded or been cancelled.
    pub fn pending(&self) -> impl Iterator<Item = &Request> {
        self.requests.values().filter(|r| r.status.is_pending())
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// `true` when every request is terminal.
    pub fn all_settled(&self) -> bool {
        self.requests.values().all(|r| r.status.is_terminal())
    }
}
