//! Derived hostel status reporting
//!
//! Always recomputed from live room state; the snapshot is never
//! authoritative and never cached.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hostel::registry::Hostel;
use crate::hostel::room::ROOM_CAPACITY;

/// Aggregate occupancy snapshot with a per-building breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostelStatus {
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub available_rooms: usize,
    pub total_slots: usize,
    pub occupied_slots: usize,
    pub available_slots: usize,
    pub buildings: BTreeMap<String, BuildingStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingStatus {
    pub floors: BTreeMap<String, FloorStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorStatus {
    pub total_rooms: usize,
    pub available_rooms: usize,
    pub available_slots: usize,
    pub rooms: Vec<RoomStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomStatus {
    pub room_id: String,
    pub occupied_by: Vec<String>,
    pub available_slots: usize,
}

/// Walk every building, floor, and room and total up occupancy.
pub fn hostel_status(hostel: &Hostel) -> HostelStatus {
    let mut status = HostelStatus {
        total_rooms: 0,
        occupied_rooms: 0,
        available_rooms: 0,
        total_slots: 0,
        occupied_slots: 0,
        available_slots: 0,
        buildings: BTreeMap::new(),
    };

    for building in hostel.buildings() {
        let mut building_status = BuildingStatus {
            floors: BTreeMap::new(),
        };

        for floor in &building.floors {
            let rooms: Vec<RoomStatus> = floor
                .rooms()
                .iter()
                .map(|room| RoomStatus {
                    room_id: room.room_id(),
                    occupied_by: room.occupants(),
                    available_slots: room.available_slots(),
                })
                .collect();

            let floor_status = FloorStatus {
                total_rooms: floor.rooms().len(),
                available_rooms: floor.available_rooms().count(),
                available_slots: floor.total_available_slots(),
                rooms,
            };

            status.total_rooms += floor_status.total_rooms;
            status.available_rooms += floor_status.available_rooms;
            status.total_slots += floor_status.total_rooms * ROOM_CAPACITY;
            status.available_slots += floor_status.available_slots;

            building_status
                .floors
                .insert(floor.floor_id(), floor_status);
        }

        status.buildings.insert(building.code.clone(), building_status);
    }

    status.occupied_rooms = status.total_rooms - status.available_rooms;
    status.occupied_slots = status.total_slots - status.available_slots;
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hostel::layout::HostelLayout;

    #[test]
    fn fresh_standard_status() {
        let hostel = Hostel::from_layout(&HostelLayout::standard()).unwrap();
        let status = hostel_status(&hostel);

        assert_eq!(status.total_rooms, 108);
        assert_eq!(status.total_slots, 216);
        assert_eq!(status.occupied_rooms, 0);
        assert_eq!(status.occupied_slots, 0);
        assert_eq!(status.available_slots, 216);
        assert_eq!(status.buildings.len(), 2);
        assert_eq!(status.buildings["A"].floors.len(), 4);
        assert_eq!(status.buildings["B"].floors.len(), 2);
    }

    #[test]
    fn claims_show_up_in_totals_and_breakdown() {
        let mut hostel = Hostel::from_layout(&HostelLayout::standard()).unwrap();
        hostel
            .lookup_room_mut("B1-001")
            .unwrap()
            .claim(&"R001".to_string());

        let status = hostel_status(&hostel);
        assert_eq!(status.occupied_rooms, 1);
        assert_eq!(status.occupied_slots, 2);

        let floor = &status.buildings["B"].floors["B1"];
        assert_eq!(floor.available_rooms, 23);
        assert_eq!(floor.available_slots, 46);

        let room = floor.rooms.iter().find(|r| r.room_id == "B1-001").unwrap();
        assert_eq!(room.available_slots, 0);
        assert_eq!(room.occupied_by.len(), 2);
    }
}
