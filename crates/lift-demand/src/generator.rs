//! Synthetic passenger demand.
//!
//! [`LoadGenerator`] draws a Poisson-distributed number of new passengers each
//! tick at a configured mean rate and gives every passenger a random origin
//! and destination.  A `ground_bias` sends a share of trips out of the lobby,
//! which reproduces the up-peak ("morning rush") pattern most dispatch
//! policies are tuned for.
//!
//! The generator owns its own [`SimRng`], so the same seed always yields the
//! same trip sequence regardless of what the engine does with the trips.

use lift_core::{Floor, SimRng, Tick};

use crate::{DemandError, DemandResult};

/// Upper bound on arrivals drawn in a single tick.  Keeps a misconfigured
/// rate from stalling the Poisson sampler.
const MAX_ARRIVALS_PER_TICK: u32 = 64;

/// A trip to submit to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    pub origin:      Floor,
    pub destination: Floor,
    /// Tick the passenger reaches the landing.
    pub at:          Tick,
}

/// Shape of the synthetic demand.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadProfile {
    /// Number of floors trips are drawn over.
    pub floors: u32,
    /// Mean new passengers per simulated second.
    pub arrival_rate_per_sec: f64,
    /// Probability that a trip starts on the ground floor, in `[0, 1]`.
    pub ground_bias: f64,
    /// Simulated seconds per tick (must match the engine).
    pub tick_duration_secs: u32,
}

impl LoadProfile {
    pub fn validate(&self) -> DemandResult<()> {
        if self.floors < 2 {
            return Err(DemandError::Profile(format!(
                "need at least 2 floors, got {}",
                self.floors
            )));
        }
        if !(self.arrival_rate_per_sec.is_finite() && self.arrival_rate_per_sec >= 0.0) {
            return Err(DemandError::Profile(format!(
                "arrival rate must be finite and non-negative, got {}",
                self.arrival_rate_per_sec
            )));
        }
        if !(0.0..=1.0).contains(&self.ground_bias) {
            return Err(DemandError::Profile(format!(
                "ground bias must lie in [0, 1], got {}",
                self.ground_bias
            )));
        }
        if self.tick_duration_secs == 0 {
            return Err(DemandError::Profile("tick duration must be at least 1 s".into()));
        }
        Ok(())
    }

    /// Mean arrivals per tick.
    #[inline]
    pub fn mean_per_tick(&self) -> f64 {
        self.arrival_rate_per_sec * self.tick_duration_secs as f64
    }
}

/// Seeded generator of [`Trip`]s.
pub struct LoadGenerator {
    profile: LoadProfile,
    rng:     SimRng,
    /// `exp(-λ)` cached for the Poisson sampler.
    threshold: f64,
}

impl LoadGenerator {
    pub fn new(profile: LoadProfile, seed: u64) -> DemandResult<Self> {
        Self::with_rng(profile, SimRng::new(seed))
    }

    /// Build from an existing RNG stream, e.g. one shared with other draws.
    pub fn with_rng(profile: LoadProfile, rng: SimRng) -> DemandResult<Self> {
        profile.validate()?;
        let threshold = (-profile.mean_per_tick()).exp();
        Ok(Self { profile, rng, threshold })
    }

    pub fn profile(&self) -> &LoadProfile {
        &self.profile
    }

    /// Trips whose passengers reach their landing at `now`.
    pub fn generate(&mut self, now: Tick) -> Vec<Trip> {
        let n = self.sample_count();
        (0..n).map(|_| self.sample_trip(now)).collect()
    }

    /// Trips for every tick in `from..to`, in tick order.
    pub fn generate_span(&mut self, from: Tick, to: Tick) -> Vec<Trip> {
        (from.0..to.0).flat_map(|t| self.generate(Tick(t))).collect()
    }

    /// Knuth's multiplication method.  Fine for the small per-tick means
    /// elevator traffic produces.
    fn sample_count(&mut self) -> u32 {
        let mut k = 0;
        let mut p: f64 = self.rng.random();
        while p > self.threshold && k < MAX_ARRIVALS_PER_TICK {
            k += 1;
            p *= self.rng.random::<f64>();
        }
        k
    }

    fn sample_trip(&mut self, at: Tick) -> Trip {
        let floors = self.profile.floors;
        let origin = if self.rng.gen_bool(self.profile.ground_bias) {
            0
        } else {
            self.rng.gen_range(0..floors)
        };
        // Uniform over every floor except the origin.
        let mut destination = self.rng.gen_range(0..floors - 1);
        if destination >= origin {
            destination += 1;
        }
        Trip { origin: Floor(origin), destination: Floor(destination), at }
    }
}
