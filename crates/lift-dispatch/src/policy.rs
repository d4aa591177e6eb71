//! The `DispatchPolicy` trait — the extension point for assignment strategies.

use lift_car::StopOrdering;

use crate::{CarView, RequestView};

/// How expensive it is for a car to serve a request.  Lower is better.
///
/// Costs compare by `tier` first, then `floors`, so a policy can rank whole
/// classes of car (e.g. "already heading there" before "idle") without
/// inventing penalty constants.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost {
    pub tier:   u8,
    pub floors: u32,
}

impl Cost {
    pub const ZERO: Cost = Cost { tier: 0, floors: 0 };

    #[inline]
    pub fn new(tier: u8, floors: u32) -> Self {
        Self { tier, floors }
    }
}

/// Pluggable car-selection strategy.
///
/// Only [`score`][Self::score] is required, and it judges one car at a
/// time.  The dispatcher scores every car, including full ones, then walks
/// the ranking from the lowest cost (ties to the lowest car id) and takes
/// the first car with room.  A policy never needs to check capacity itself.
///
/// # Thread safety
///
/// With the `parallel` feature the dispatcher scores cars for many requests
/// at once via Rayon, so implementations must be `Send + Sync`.  `score`
/// takes `&self`; a policy keeps no per-tick state.
///
/// # Example
///
/// ```rust,ignore
/// struct LowestFloorFirst;
///
/// impl DispatchPolicy for LowestFloorFirst {
///     fn score(&self, car: &CarView, _request: &RequestView) -> Option<Cost> {
///         Some(Cost::new(0, car.floor.0))
///     }
/// }
/// ```
pub trait DispatchPolicy: Send + Sync + 'static {
    /// Cost of sending `car` to `request`, or `None` if the car must not take it.
    fn score(&self, car: &CarView, request: &RequestView) -> Option<Cost>;

    /// Stop ordering for every car under this policy.
    ///
    /// Default: [`StopOrdering::Sweep`].
    fn stop_ordering(&self) -> StopOrdering {
        StopOrdering::Sweep
    }

    /// Label used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}
