//! `lift-dispatch` — assigning cars to passengers.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`view`]       | `CarView`, `RequestView` — read-only dispatch inputs      |
//! | [`policy`]     | `DispatchPolicy` trait, `Cost`                            |
//! | [`builtin`]    | `NearestCar`, `Scan`, `FirstCome`, `BuiltinPolicy`        |
//! | [`dispatcher`] | `Dispatcher<P>` — ranking, capacity ledger, batch assign  |
//!
//! # Rules every policy gets for free
//!
//! - A car is eligible for a passenger only while
//!   `onboard + assigned-not-boarded < capacity`.
//! - Lowest cost wins; equal costs go to the lowest car id.
//! - Requests in a batch are resolved in the order given (the engine passes
//!   ascending `RequestId`), each reserving a place before the next is looked at.
//! - A request no car can take is left for the next round.

pub mod builtin;
pub mod dispatcher;
pub mod policy;
pub mod view;


pub use builtin::{BuiltinPolicy, FirstCome, NearestCar, Scan};
pub use dispatcher::Dispatcher;
pub use policy::{Cost, DispatchPolicy};
pub use view::{CarView, RequestView};
