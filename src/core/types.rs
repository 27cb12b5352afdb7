//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WardenError};

/// A student roll number, standing in for one room's worth of occupants
/// (the representative and an implicit roommate).
pub type RollNumber = String;

/// Numeric room number, displayed zero-padded to three digits (`001`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomNumber(pub u16);

impl RoomNumber {
    /// Parse a room-number label, tolerating leading zeros ("001" -> 1).
    ///
    /// Non-numeric labels are a structural error in the layout, not a panic.
    pub fn parse(label: &str) -> Result<Self> {
        label
            .trim()
            .parse::<u16>()
            .map(Self)
            .map_err(|_| {
                WardenError::MalformedLayout(format!("non-numeric room number: {:?}", label))
            })
    }

    /// True when `other` is exactly the next room number in sequence.
    pub fn precedes(&self, other: RoomNumber) -> bool {
        other.0.checked_sub(self.0) == Some(1)
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Parsed form of a room identifier string like `A0-001`
///
/// The part before the dash is the floor id (building code + floor label);
/// the part after is the room number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRef {
    pub floor_id: String,
    pub number: RoomNumber,
}

impl RoomRef {
    /// Parse a room identifier from saved state.
    pub fn parse(room_id: &str) -> Result<Self> {
        let (floor_id, number) = room_id.split_once('-').ok_or_else(|| {
            WardenError::MalformedState(format!("room id without dash: {:?}", room_id))
        })?;
        if floor_id.is_empty() {
            return Err(WardenError::MalformedState(format!(
                "room id with empty floor part: {:?}",
                room_id
            )));
        }
        let number = RoomNumber::parse(number).map_err(|_| {
            WardenError::MalformedState(format!("room id with non-numeric number: {:?}", room_id))
        })?;
        Ok(Self {
            floor_id: floor_id.to_string(),
            number,
        })
    }
}
