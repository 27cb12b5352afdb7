//! The hostel aggregate - buildings, floors, rooms built from a layout

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WardenError};
use crate::core::types::{RoomNumber, RoomRef};
use crate::hostel::floor::Floor;
use crate::hostel::layout::HostelLayout;
use crate::hostel::room::Room;

/// A building owning an ordered list of floors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub code: String,
    pub floors: Vec<Floor>,
}

/// The whole hostel: every building, floor, and room
///
/// Rooms are only ever mutated by the allocation engine (claiming) and by
/// state restore (replay); the topology itself is fixed after construction.
#[derive(Debug, Clone)]
pub struct Hostel {
    buildings: Vec<Building>,
    /// floor id -> (building index, floor index)
    floor_index: AHashMap<String, (usize, usize)>,
}

impl Hostel {
    /// Build the room inventory from a validated layout.
    pub fn from_layout(layout: &HostelLayout) -> Result<Self> {
        layout.validate()?;

        let mut buildings = Vec::with_capacity(layout.buildings.len());
        let mut floor_index = AHashMap::new();

        for (b_idx, building_layout) in layout.buildings.iter().enumerate() {
            let mut floors = Vec::with_capacity(building_layout.floors.len());
            for (f_idx, floor_layout) in building_layout.floors.iter().enumerate() {
                let mut rooms = Vec::with_capacity(floor_layout.rooms.len());
                for label in &floor_layout.rooms {
                    let number = RoomNumber::parse(label)?;
                    rooms.push(Room::new(
                        building_layout.code.clone(),
                        floor_layout.label.clone(),
                        number,
                    ));
                }
                let floor = Floor::new(
                    building_layout.code.clone(),
                    floor_layout.label.clone(),
                    rooms,
                );
                floor_index.insert(floor.floor_id(), (b_idx, f_idx));
                floors.push(floor);
            }
            buildings.push(Building {
                code: building_layout.code.clone(),
                floors,
            });
        }

        Ok(Self {
            buildings,
            floor_index,
        })
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn floors(&self) -> impl Iterator<Item = &Floor> {
        self.buildings.iter().flat_map(|b| b.floors.iter())
    }

    pub fn floor(&self, floor_id: &str) -> Option<&Floor> {
        let &(b, f) = self.floor_index.get(floor_id)?;
        Some(&self.buildings[b].floors[f])
    }

    pub fn floor_mut(&mut self, floor_id: &str) -> Option<&mut Floor> {
        let &(b, f) = self.floor_index.get(floor_id)?;
        Some(&mut self.buildings[b].floors[f])
    }

    /// Floors that still have vacant slots, paired with their slot count
    /// and sorted descending by availability (ties keep layout order).
    pub fn floors_with_availability(&self) -> Vec<(String, usize)> {
        let mut floors: Vec<(String, usize)> = self
            .floors()
            .map(|f| (f.floor_id(), f.total_available_slots()))
            .filter(|(_, slots)| *slots > 0)
            .collect();
        floors.sort_by(|a, b| b.1.cmp(&a.1));
        floors
    }

    /// Resolve a room identifier string (e.g. `A0-001`) to its room.
    ///
    /// Identifiers outside the fixed layout are malformed state, since
    /// they can only come from saved records.
    pub fn lookup_room_mut(&mut self, room_id: &str) -> Result<&mut Room> {
        let room_ref = RoomRef::parse(room_id)?;
        let floor = self.floor_mut(&room_ref.floor_id).ok_or_else(|| {
            WardenError::MalformedState(format!("unknown floor in room id: {:?}", room_id))
        })?;
        floor.room_mut(room_ref.number).ok_or_else(|| {
            WardenError::MalformedState(format!("unknown room in layout: {:?}", room_id))
        })
    }

    /// Discard every claim, restoring the freshly-built layout.
    pub fn reset(&mut self) {
        for building in &mut self.buildings {
            for floor in &mut building.floors {
                floor.clear_all();
            }
        }
    }

    pub fn total_rooms(&self) -> usize {
        self.floors().map(|f| f.rooms().len()).sum()
    }
}
