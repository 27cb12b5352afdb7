//! Allocation policy and history

pub mod engine;
pub mod history;

pub use engine::{allocate, MAX_GROUP_ROOMS};
pub use history::{AllocationEvent, AllocationMap, HistoryLog};
