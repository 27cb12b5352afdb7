//! Hostel data model - rooms, floors, buildings, and their layout

pub mod floor;
pub mod layout;
pub mod registry;
pub mod room;

pub use floor::Floor;
pub use layout::{BuildingLayout, FloorLayout, HostelLayout};
pub use registry::{Building, Hostel};
pub use room::{Room, Slot, ROOM_CAPACITY};
