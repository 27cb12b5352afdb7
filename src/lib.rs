//! Hostel Warden - dormitory room allocation core

pub mod allocation;
pub mod core;
pub mod hostel;
pub mod state;
pub mod status;
pub mod system;

pub use crate::core::error::{Result, WardenError};
pub use crate::system::HostelSystem;
