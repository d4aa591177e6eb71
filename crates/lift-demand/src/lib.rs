//! `lift-demand` — the passenger side of the simulation.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`request`]       | `Request`, `RequestStatus` — one passenger journey        |
//! | [`store`]         | `RequestStore` — every request ever accepted, by id       |
//! | [`arrival_queue`] | `ArrivalQueue` — requests submitted for a future tick     |
//! | [`generator`]     | `LoadGenerator`, `LoadProfile`, `Trip` — synthetic demand |
//! | [`error`]         | `DemandError`, `DemandResult<T>`                          |
//!
//! # Request lifecycle
//!
//! ```text
//! Scheduled ──release──▶ Waiting ──assign──▶ Assigned ──board──▶ Boarded ──arrive──▶ Arrived
//!                          ▲  │                 │
//!                          │  └──cancel──┐      ├──unassign (car full)──▶ Waiting
//!                          │             ▼      └──cancel at boarding───▶ Cancelled
//!                          └─────────  Cancelled
//! ```
//!
//! `Arrived` and `Cancelled` are terminal: no transition leaves them.

pub mod arrival_queue;
pub mod error;
pub mod generator;
pub mod request;
pub mod store;


pub use arrival_queue::ArrivalQueue;
pub use error::{DemandError, DemandResult};
pub use generator::{LoadGenerator, LoadProfile, Trip};
pub use request::{Request, RequestStatus};
pub use store::RequestStore;
