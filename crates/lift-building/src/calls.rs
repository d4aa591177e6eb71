//! Hall-call panel: one up and one down button per landing.
//!
//! A call is registered when a button is pressed and stays lit until a car
//! opens its doors at that landing while heading the call's way.  Pressing a
//! lit button again is a no-op, so each `(floor, direction)` pair holds at
//! most one pending call.
//!
//! The panel also remembers which car (if any) has been sent to answer each
//! call so the dispatcher does not send a second car for the same button.

use lift_core::{Direction, ElevatorId, Floor, Tick};

use crate::{BuildingError, BuildingResult};

/// A lit hall button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HallCall {
    pub floor:      Floor,
    /// `Up` or `Down`, never `Idle`.
    pub direction:  Direction,
    /// Tick the button was first pressed.
    pub pressed_at: Tick,
    /// Car dispatched to answer this call, if any.
    pub served_by:  Option<ElevatorId>,
    /// Pressed by hand rather than lit for a queued passenger.  Such a call
    /// stays lit until a car answers it, even if its line empties.
    pub manual:     bool,
}

/// All hall buttons in the building.  Indexed `[floor][0 = up, 1 = down]`.
#[derive(Clone, Debug, Default)]
pub struct CallPanel {
    slots: Vec<[Option<HallCall>; 2]>,
}

#[inline]
fn slot(direction: Direction) -> BuildingResult<usize> {
    match direction {
        Direction::Up   => Ok(0),
        Direction::Down => Ok(1),
        Direction::Idle => Err(BuildingError::NoDirection),
    }
}

impl CallPanel {
    /// A panel with every button dark.
    pub fn new(floors: u32) -> Self {
        Self { slots: vec![[None, None]; floors as usize] }
    }

    fn check(&self, floor: Floor) -> BuildingResult<()> {
        if floor.index() < self.slots.len() {
            Ok(())
        } else {
            Err(BuildingError::OutOfRange { floor, floors: self.slots.len() as u32 })
        }
    }

    /// Press a hall button.
    ///
    /// Returns `Ok(true)` if the call is newly registered, `Ok(false)` if the
    /// button was already lit.
    pub fn press(&mut self, floor: Floor, direction: Direction, now: Tick) -> BuildingResult<bool> {
        self.check(floor)?;
        let s = slot(direction)?;
        let entry = &mut self.slots[floor.index()][s];
        if entry.is_some() {
            return Ok(false);
        }
        *entry = Some(HallCall { floor, direction, pressed_at: now, served_by: None, manual: false });
        Ok(true)
    }

    /// Press a hall button by hand.  Same as [`press`][Self::press], but the
    /// call survives [`withdraw`][Self::withdraw].
    pub fn press_manual(&mut self, floor: Floor, direction: Direction, now: Tick) -> BuildingResult<bool> {
        let lit = self.press(floor, direction, now)?;
        if let Some(call) = self.slots[floor.index()][slot(direction)?].as_mut() {
            call.manual = true;
        }
        Ok(lit)
    }

    /// Turn off a call whose last waiting passenger left the line without a
    /// car.  Calls pressed by hand stay lit.
    pub fn withdraw(&mut self, floor: Floor, direction: Direction) -> Option<HallCall> {
        if self.get(floor, direction)?.manual {
            return None;
        }
        self.clear(floor, direction)
    }

    /// Turn a button off.  Returns the call that was lit, if any.
    pub fn clear(&mut self, floor: Floor, direction: Direction) -> Option<HallCall> {
        let s = slot(direction).ok()?;
        self.slots.get_mut(floor.index())?[s].take()
    }

    /// The pending call for `(floor, direction)`, if lit.
    pub fn get(&self, floor: Floor, direction: Direction) -> Option<&HallCall> {
        let s = slot(direction).ok()?;
        self.slots.get(floor.index())?[s].as_ref()
    }

    #[inline]
    pub fn is_pending(&self, floor: Floor, direction: Direction) -> bool {
        self.get(floor, direction).is_some()
    }

    /// Record that `car` answers the call.  Keeps an earlier assignment.
    ///
    /// Returns `true` if the call exists and is now served by `car`.
    pub fn assign(&mut self, floor: Floor, direction: Direction, car: ElevatorId) -> bool {
        let Ok(s) = slot(direction) else { return false };
        match self.slots.get_mut(floor.index()).and_then(|f| f[s].as_mut()) {
            Some(call) => {
                let served = call.served_by.get_or_insert(car);
                *served == car
            }
            None => false,
        }
    }

    /// Forget which car answers the call so it can be dispatched again.
    pub fn unassign(&mut self, floor: Floor, direction: Direction) -> bool {
        let Ok(s) = slot(direction) else { return false };
        match self.slots.get_mut(floor.index()).and_then(|f| f[s].as_mut()) {
            Some(call) => call.served_by.take().is_some(),
            None => false,
        }
    }

    /// Lit calls that no car has been sent to, ground floor first, `Up`
    /// before `Down` on the same floor.
    pub fn unserved(&self) -> Vec<(Floor, Direction)> {
        self.pending()
            .filter(|c| c.served_by.is_none())
            .map(|c| (c.floor, c.direction))
            .collect()
    }

    /// Every lit call in floor order.
    pub fn pending(&self) -> impl Iterator<Item = &HallCall> {
        self.slots.iter().flat_map(|pair| pair.iter().flatten())
    }

    /// Number of lit buttons.
    pub fn len(&self) -> usize {
        self.pending().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
