//! Room model with typed occupancy slots

use serde::{Deserialize, Serialize};

use crate::core::types::{RollNumber, RoomNumber};

/// Every room holds exactly two slots.
pub const ROOM_CAPACITY: usize = 2;

/// One of the two capacity units in a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Vacant,
    /// Held by the representative student
    Occupant(RollNumber),
    /// Held for the roommate the representative stands in for
    ReservedForRoommate { of: RollNumber },
}

impl Slot {
    pub fn is_vacant(&self) -> bool {
        matches!(self, Slot::Vacant)
    }

    /// Human-readable occupant label, `None` for a vacant slot.
    pub fn describe(&self) -> Option<String> {
        match self {
            Slot::Vacant => None,
            Slot::Occupant(roll) => Some(roll.clone()),
            Slot::ReservedForRoommate { of } => Some(format!("roommate of {}", of)),
        }
    }
}

/// A single capacity-2 room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub building: String,
    pub floor: String,
    pub number: RoomNumber,
    slots: [Slot; ROOM_CAPACITY],
}

impl Room {
    pub fn new(building: impl Into<String>, floor: impl Into<String>, number: RoomNumber) -> Self {
        Self {
            building: building.into(),
            floor: floor.into(),
            number,
            slots: [Slot::Vacant, Slot::Vacant],
        }
    }

    /// Unique room identifier, e.g. `A0-001`
    pub fn room_id(&self) -> String {
        format!("{}{}-{}", self.building, self.floor, self.number)
    }

    pub fn is_available(&self) -> bool {
        self.available_slots() > 0
    }

    /// Number of vacant slots (0, 1, or 2)
    pub fn available_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_vacant()).count()
    }

    /// True when neither slot is held.
    pub fn is_empty(&self) -> bool {
        self.available_slots() == ROOM_CAPACITY
    }

    /// Claim both slots atomically for a representative and their roommate.
    ///
    /// Returns false without mutating if the room is not fully empty.
    pub fn claim(&mut self, roll: &RollNumber) -> bool {
        if !self.is_empty() {
            return false;
        }
        self.slots[0] = Slot::Occupant(roll.clone());
        self.slots[1] = Slot::ReservedForRoommate { of: roll.clone() };
        true
    }

    /// Release both slots. Only used when rebuilding from the layout.
    pub(crate) fn clear(&mut self) {
        self.slots = [Slot::Vacant, Slot::Vacant];
    }

    /// The representative holding this room, if any.
    pub fn representative(&self) -> Option<&RollNumber> {
        self.slots.iter().find_map(|s| match s {
            Slot::Occupant(roll) => Some(roll),
            _ => None,
        })
    }

    /// Occupant labels for reporting, representative first.
    pub fn occupants(&self) -> Vec<String> {
        self.slots.iter().filter_map(Slot::describe).collect()
    }
}
