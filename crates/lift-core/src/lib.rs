//! `lift-core` — foundational types for the `lift` elevator simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ElevatorId`, `RequestId`, `Floor`                    |
//! | [`direction`]   | `Direction` enum (`Up`, `Down`, `Idle`)               |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `EngineConfig`, `DispatchPolicyKind`                  |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `ConfigError`, `ConfigResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DispatchPolicyKind, EngineConfig};
pub use direction::Direction;
pub use error::{ConfigError, ConfigResult};
pub use ids::{ElevatorId, Floor, RequestId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
