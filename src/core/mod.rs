pub mod error;
pub mod types;

pub use error::{Result, WardenError};
pub use types::{RollNumber, RoomNumber, RoomRef};
