//! `Dispatcher` — picks a car for each request that needs one.
//!
//! A dispatch round works on one immutable set of [`CarView`]s:
//!
//! 1. **Rank** (parallel with the `parallel` feature): for every request,
//!    score every car with the policy and sort the candidates by
//!    `(cost, car id)`.  Capacity is ignored here.
//! 2. **Pick** (sequential, ascending request order): take the first
//!    candidate that still has room on the round's capacity ledger, and
//!    reserve a place on it.
//!
//! Because ranking never sees the ledger, both paths produce identical
//! assignments.

use lift_car::StopOrdering;
use lift_core::ElevatorId;
use tracing::trace;

use crate::{BuiltinPolicy, CarView, Cost, DispatchPolicy, RequestView};

pub struct Dispatcher<P = BuiltinPolicy> {
    policy: P,
}

impl<P: DispatchPolicy> Dispatcher<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[inline]
    pub fn stop_ordering(&self) -> StopOrdering {
        self.policy.stop_ordering()
    }

    /// Best car with room for `request`, or `None` if no car can take it.
    pub fn assign(&self, request: &RequestView, cars: &[CarView]) -> Option<ElevatorId> {
        self.rank(request, cars)
            .into_iter()
            .map(|(_, i)| &cars[i])
            .find(|car| !request.needs_capacity || car.has_room())
            .map(|car| car.id)
    }

    /// Indices into `cars` of every car the policy will consider, cheapest
    /// first, ties broken by car id.
    pub fn rank(&self, request: &RequestView, cars: &[CarView]) -> Vec<(Cost, usize)> {
        let mut ranked: Vec<(Cost, usize)> = cars
            .iter()
            .enumerate()
            .filter_map(|(i, car)| self.policy.score(car, request).map(|cost| (cost, i)))
            .collect();
        ranked.sort_by_key(|&(cost, i)| (cost, cars[i].id));
        ranked
    }

    /// Resolve `requests` in order, reserving capacity on `cars` as each
    /// passenger request is placed.
    ///
    /// Returns one entry per request; `None` means no car had room and the
    /// request should be retried next round.
    pub fn assign_batch(
        &self,
        requests: &[RequestView],
        cars:     &mut [CarView],
    ) -> Vec<Option<ElevatorId>> {
        let rankings = self.rank_all(requests, cars);

        requests
            .iter()
            .zip(rankings)
            .map(|(request, ranking)| {
                let pick = ranking
                    .into_iter()
                    .map(|(_, i)| i)
                    .find(|&i| !request.needs_capacity || cars[i].has_room());
                match pick {
                    Some(i) => {
                        if request.needs_capacity {
                            cars[i].committed += 1;
                        }
                        Some(cars[i].id)
                    }
                    None => {
                        trace!(
                            policy = self.policy.name(),
                            origin = %request.origin,
                            "no car with room"
                        );
                        None
                    }
                }
            })
            .collect()
    }

    fn rank_all(&self, requests: &[RequestView], cars: &[CarView]) -> Vec<Vec<(Cost, usize)>> {
        #[cfg(not(feature = "parallel"))]
        {
            requests.iter().map(|r| self.rank(r, cars)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            requests.par_iter().map(|r| self.rank(r, cars)).collect()
        }
    }
}

impl Default for Dispatcher<BuiltinPolicy> {
    fn default() -> Self {
        Self::new(BuiltinPolicy::default())
    }
}
