//! Typed identifiers for cars, requests and floors.
//!
//! Cars and floors are dense (`0..elevators`, `0..floors`) and index straight
//! into per-car and per-floor `Vec`s through `.index()`.  Requests are
//! numbered in submission order and never reused.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Placeholder for "none", e.g. in errors raised before a value
            /// is known.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// A car, numbered `0..elevators`.  Ties between equally good cars go to
    /// the lowest id.
    pub struct ElevatorId(u32);
}

typed_id! {
    /// One passenger request, allocated in submission order.
    pub struct RequestId(u64);
}

typed_id! {
    /// A floor in `0..floors`; floor 0 is the ground floor.
    pub struct Floor(u32);
}

impl Floor {
    /// Floors between `self` and `other`, which is also the travel time in
    /// ticks.
    #[inline]
    pub fn distance(self, other: Floor) -> u32 {
        self.0.abs_diff(other.0)
    }

    /// One floor up (`sign > 0`) or down (`sign < 0`).  Saturates at the
    /// ground floor; the top floor is the building's to enforce.
    #[inline]
    pub fn step(self, sign: i32) -> Floor {
        Floor(self.0.saturating_add_signed(sign))
    }
}
