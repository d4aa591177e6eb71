//! `lift-building` — the static side of the simulated building.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`building`]     | `Building` — floor count, storey height, range checks    |
//! | [`calls`]        | `CallPanel`, `HallCall` — deduplicated up/down buttons   |
//! | [`floor_queue`]  | `FloorQueues` — passengers waiting at each landing       |
//! | [`error`]        | `BuildingError`, `BuildingResult<T>`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod building;
pub mod calls;
pub mod error;
pub mod floor_queue;


pub use building::Building;
pub use calls::{CallPanel, HallCall};
pub use error::{BuildingError, BuildingResult};
pub use floor_queue::FloorQueues;
