//! Observer trait for progress reporting and data collection.

use lift_core::Tick;

use crate::{SimEvent, TickReport};

/// Callbacks invoked by [`Engine::run_ticks`][crate::Engine::run_ticks] and
/// friends at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — delivery counter
///
/// ```rust,ignore
/// struct Delivered(usize);
///
/// impl SimObserver for Delivered {
///     fn on_event(&mut self, event: &SimEvent) {
///         if matches!(event.kind, EventKind::Alighted { .. }) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the engine processes `tick`.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per event, in emission order.
    fn on_event(&mut self, _event: &SimEvent) {}

    /// Called with the complete report once the tick is done.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called once when the engine shuts down.  `final_tick` is the first
    /// tick that will never run.
    fn on_shutdown(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
