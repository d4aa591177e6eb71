//! `lift-sim` — the elevator simulation engine.
//!
//! # Tick loop
//!
//! ```text
//! every tick:
//!   ① Release   — scheduled requests due now join their landing and light
//!                 the hall button.
//!   ② Dispatch  — waiting requests (ascending RequestId), then hall calls
//!                 nobody answers, go to the Dispatcher (parallel ranking
//!                 with the `parallel` feature, sequential apply).
//!   ③ Step      — each car, ascending ElevatorId, makes one transition and
//!                 at most one floor of travel.
//!   ④ Service   — cars with open doors: heading, alight, board, lamps.
//!   ⑤ Report    — the tick's events, in emission order, as a TickReport.
//! ```
//!
//! The same configuration fed the same calls in the same order always
//! produces the same reports.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`engine`]   | `Engine<P>` — single-owner state and the tick loop         |
//! | [`builder`]  | `EngineBuilder<P>` — validation and construction           |
//! | [`shared`]   | `SharedEngine<P>` — `Send + Sync` handle for many threads  |
//! | [`event`]    | `SimEvent`, `EventKind`, `TickReport`                      |
//! | [`snapshot`] | `EngineSnapshot`, `CarSnapshot`, `RequestSnapshot`         |
//! | [`observer`] | `SimObserver` trait, `NoopObserver`                        |
//! | [`error`]    | `EngineError`, `EngineResult<T>`                           |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Ranks dispatch candidates on Rayon's thread pool.      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on events/snapshots. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::{EngineConfig, Floor, Tick};
//! use lift_sim::{EngineBuilder, NoopObserver};
//!
//! let mut engine = EngineBuilder::new(EngineConfig::default()).build()?;
//! engine.submit_request(Floor(0), Floor(7), Tick(0))?;
//! engine.run_until_idle(500, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod event;
pub mod observer;
pub mod shared;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use event::{EventKind, SimEvent, TickReport};
pub use observer::{NoopObserver, SimObserver};
pub use shared::SharedEngine;
pub use snapshot::{CarSnapshot, EngineSnapshot, RequestSnapshot};
