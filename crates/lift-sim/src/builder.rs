//! Fluent builder for constructing an [`Engine`].

use lift_building::Building;
use lift_car::Elevator;
use lift_core::{ElevatorId, EngineConfig};
use lift_dispatch::{BuiltinPolicy, DispatchPolicy, Dispatcher};
use tracing::info;

use crate::{Engine, EngineResult, SharedEngine};

/// Fluent builder for [`Engine<P>`].
///
/// The policy defaults to the built-in one named by
/// `config.dispatch_policy`; [`with_policy`][Self::with_policy] swaps in any
/// [`DispatchPolicy`].
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(EngineConfig::default()).build()?;
/// let id = engine.submit_request(Floor(0), Floor(4), Tick(0))?;
/// engine.run_until_idle(1_000, &mut NoopObserver)?;
/// ```
pub struct EngineBuilder<P: DispatchPolicy = BuiltinPolicy> {
    config: EngineConfig,
    policy: P,
}

impl EngineBuilder<BuiltinPolicy> {
    pub fn new(config: EngineConfig) -> Self {
        let policy = BuiltinPolicy::from(config.dispatch_policy);
        Self { config, policy }
    }
}

impl<P: DispatchPolicy> EngineBuilder<P> {
    /// Use `policy` instead of the configured built-in.
    pub fn with_policy<Q: DispatchPolicy>(self, policy: Q) -> EngineBuilder<Q> {
        EngineBuilder { config: self.config, policy }
    }

    /// Validate the configuration and park every car at the start floor.
    ///
    /// Fails with [`EngineError::InvalidConfiguration`][crate::EngineError]
    /// before anything is allocated.
    pub fn build(self) -> EngineResult<Engine<P>> {
        self.config.validate()?;
        let building = Building::from_config(&self.config)?;
        let dispatcher = Dispatcher::new(self.policy);

        let ordering = dispatcher.stop_ordering();
        let cars = (0..self.config.elevators)
            .map(|i| Elevator::new(ElevatorId(i), &self.config, ordering))
            .collect();

        info!(
            floors    = self.config.floors,
            elevators = self.config.elevators,
            capacity  = self.config.capacity_per_elevator,
            dwell     = self.config.door_dwell_ticks,
            policy    = dispatcher.policy().name(),
            "engine built"
        );
        Ok(Engine::from_parts(self.config, building, cars, dispatcher))
    }

    /// [`build`][Self::build], wrapped for use from several threads.
    pub fn build_shared(self) -> EngineResult<SharedEngine<P>> {
        Ok(SharedEngine::new(self.build()?))
    }
}
