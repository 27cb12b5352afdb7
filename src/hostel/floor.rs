//! Floor model - ordered rooms, availability queries, contiguous runs

use serde::{Deserialize, Serialize};

use crate::core::types::RoomNumber;
use crate::hostel::room::Room;

/// A floor in a building, exclusively owning its rooms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub building: String,
    pub label: String,
    rooms: Vec<Room>,
}

impl Floor {
    pub fn new(building: impl Into<String>, label: impl Into<String>, rooms: Vec<Room>) -> Self {
        Self {
            building: building.into(),
            label: label.into(),
            rooms,
        }
    }

    /// Unique floor identifier, e.g. `A0`
    pub fn floor_id(&self) -> String {
        format!("{}{}", self.building, self.label)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room_mut(&mut self, number: RoomNumber) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.number == number)
    }

    pub fn available_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| r.is_available())
    }

    /// Total vacant slots across all rooms on this floor.
    pub fn total_available_slots(&self) -> usize {
        self.available_rooms().map(|r| r.available_slots()).sum()
    }

    /// Maximal runs of currently-available rooms whose numbers step by
    /// exactly 1, sorted ascending.
    ///
    /// Only *available* rooms are examined, so a run is contiguous among
    /// the vacant subset, not necessarily physically contiguous.
    pub fn contiguous_runs(&self) -> Vec<Vec<RoomNumber>> {
        let mut numbers: Vec<RoomNumber> =
            self.available_rooms().map(|r| r.number).collect();
        numbers.sort();

        let mut runs: Vec<Vec<RoomNumber>> = Vec::new();
        let mut current: Vec<RoomNumber> = Vec::new();
        for number in numbers {
            match current.last() {
                Some(prev) if prev.precedes(number) => current.push(number),
                Some(_) => {
                    runs.push(std::mem::take(&mut current));
                    current.push(number);
                }
                None => current.push(number),
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    pub(crate) fn clear_all(&mut self) {
        for room in &mut self.rooms {
            room.clear();
        }
    }
}
