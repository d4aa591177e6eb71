//! `lift-car` — the elevator car.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`state`] | `CarState`, `DoorState`, `CarEvent`                         |
//! | [`stops`] | `StopQueue`, `StopOrdering` — committed stops, sweep / FIFO |
//! | [`car`]   | `Elevator`, `Passenger`, `BoardingOutcome`                  |
//! | [`error`] | `CarError`, `CarResult<T>`                                  |
//!
//! # Stop cycle
//!
//! ```text
//!          ┌─────────────── queue empty ◀──────────────┐
//!          ▼                                           │
//!        Idle ──stop queued──▶ Moving{Up,Down} ──reach stop──▶ DoorsOpening
//!          │                        ▲                              │
//!          └─stop here──▶ DoorsOpening                             ▼
//!                                   │                       DoorsOpen (dwell)
//!                                   └────── queue non-empty ◀── DoorsClosing
//! ```
//!
//! A stop costs `door_dwell_ticks + 3` ticks: one opening, one open, the
//! dwell, one closing.  A car leaving a floor moves in the same tick it
//! leaves `Idle` or `DoorsClosing`.

pub mod car;
pub mod error;
pub mod state;
pub mod stops;

#[cfg(test)]
mod tests;

pub use car::{BoardingOutcome, Elevator, Passenger};
pub use error::{CarError, CarResult};
pub use state::{CarEvent, CarState, DoorState};
pub use stops::{StopOrdering, StopQueue};
