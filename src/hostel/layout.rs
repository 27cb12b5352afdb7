//! Hostel layout configuration
//!
//! The layout is an explicit value handed to system construction rather
//! than a hard-coded global, so tests can run against small synthetic
//! topologies. `HostelLayout::standard()` is the production topology;
//! alternate layouts can also be read from TOML files.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WardenError};
use crate::core::types::RoomNumber;

/// Full hostel topology: an ordered list of buildings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostelLayout {
    pub buildings: Vec<BuildingLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingLayout {
    /// Building code, e.g. "A"
    pub code: String,
    pub floors: Vec<FloorLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorLayout {
    /// Floor label within the building, e.g. "0" (floor id becomes "A0")
    pub label: String,
    /// Zero-padded room-number labels, e.g. "001"
    pub rooms: Vec<String>,
}

impl HostelLayout {
    /// The fixed production topology.
    ///
    /// Building A has four floors of 15 rooms each with non-contiguous
    /// number ranges; Building B has two floors of 24 contiguous rooms.
    pub fn standard() -> Self {
        let building_a_floors = [
            (
                "0",
                vec![
                    "001", "002", "003", "004", "005", "013", "014", "015", "016", "017",
                    "022", "023", "024", "025", "026",
                ],
            ),
            (
                "1",
                vec![
                    "101", "102", "103", "104", "105", "114", "115", "116", "117", "118",
                    "122", "123", "124", "125", "126",
                ],
            ),
            (
                "2",
                vec![
                    "201", "202", "203", "204", "205", "214", "215", "216", "217", "218",
                    "221", "222", "223", "224", "225",
                ],
            ),
            (
                "3",
                vec![
                    "301", "302", "303", "304", "305", "314", "315", "316", "317", "318",
                    "319", "320", "321", "322", "323",
                ],
            ),
        ];

        let building_a = BuildingLayout {
            code: "A".to_string(),
            floors: building_a_floors
                .into_iter()
                .map(|(label, rooms)| FloorLayout {
                    label: label.to_string(),
                    rooms: rooms.into_iter().map(String::from).collect(),
                })
                .collect(),
        };

        let building_b = BuildingLayout {
            code: "B".to_string(),
            floors: ["1", "2"]
                .into_iter()
                .map(|label| FloorLayout {
                    label: label.to_string(),
                    rooms: (1..=24).map(|i| format!("{:03}", i)).collect(),
                })
                .collect(),
        };

        Self {
            buildings: vec![building_a, building_b],
        }
    }

    /// Parse a layout from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let layout: HostelLayout = toml::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Read a layout from a TOML file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Structural validation: numeric room labels, no duplicate floors or
    /// room numbers, nothing empty.
    pub fn validate(&self) -> Result<()> {
        if self.buildings.is_empty() {
            return Err(WardenError::MalformedLayout(
                "layout defines no buildings".to_string(),
            ));
        }

        let mut floor_ids = HashSet::new();
        for building in &self.buildings {
            if building.code.is_empty() {
                return Err(WardenError::MalformedLayout(
                    "building with empty code".to_string(),
                ));
            }
            for floor in &building.floors {
                let floor_id = format!("{}{}", building.code, floor.label);
                if !floor_ids.insert(floor_id.clone()) {
                    return Err(WardenError::MalformedLayout(format!(
                        "duplicate floor id: {}",
                        floor_id
                    )));
                }
                if floor.rooms.is_empty() {
                    return Err(WardenError::MalformedLayout(format!(
                        "floor {} has no rooms",
                        floor_id
                    )));
                }
                let mut numbers = HashSet::new();
                for label in &floor.rooms {
                    let number = RoomNumber::parse(label)?;
                    if !numbers.insert(number) {
                        return Err(WardenError::MalformedLayout(format!(
                            "duplicate room number {} on floor {}",
                            number, floor_id
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_shape() {
        let layout = HostelLayout::standard();
        layout.validate().unwrap();

        assert_eq!(layout.buildings.len(), 2);

        let a = &layout.buildings[0];
        assert_eq!(a.code, "A");
        assert_eq!(a.floors.len(), 4);
        assert!(a.floors.iter().all(|f| f.rooms.len() == 15));

        let b = &layout.buildings[1];
        assert_eq!(b.code, "B");
        assert_eq!(b.floors.len(), 2);
        assert!(b.floors.iter().all(|f| f.rooms.len() == 24));

        // 108 rooms, 216 slots in total
        let total_rooms: usize = layout
            .buildings
            .iter()
            .flat_map(|b| &b.floors)
            .map(|f| f.rooms.len())
            .sum();
        assert_eq!(total_rooms, 108);
    }

    #[test]
    fn toml_layout_round_trip() {
        let text = r#"
            [[buildings]]
            code = "X"

            [[buildings.floors]]
            label = "1"
            rooms = ["001", "002", "005"]
        "#;
        let layout = HostelLayout::from_toml_str(text).unwrap();
        assert_eq!(layout.buildings.len(), 1);
        assert_eq!(layout.buildings[0].floors[0].rooms.len(), 3);
    }

    #[test]
    fn non_numeric_room_label_is_rejected() {
        let text = r#"
            [[buildings]]
            code = "X"

            [[buildings.floors]]
            label = "1"
            rooms = ["001", "two"]
        "#;
        let err = HostelLayout::from_toml_str(text).unwrap_err();
        assert!(matches!(err, WardenError::MalformedLayout(_)));
    }

    #[test]
    fn duplicate_room_number_is_rejected() {
        let text = r#"
            [[buildings]]
            code = "X"

            [[buildings.floors]]
            label = "1"
            rooms = ["001", "1"]
        "#;
        assert!(HostelLayout::from_toml_str(text).is_err());
    }
}
