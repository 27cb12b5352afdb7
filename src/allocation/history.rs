//! Append-only ledger of past allocations

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::types::RollNumber;

/// Roll number -> room id mapping produced by one allocation call
pub type AllocationMap = BTreeMap<RollNumber, String>;

/// One completed allocation, immutable once recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEvent {
    pub id: Uuid,
    /// ISO-8601 in serialized form
    pub timestamp: DateTime<Utc>,
    pub group_size: usize,
    pub allocation: AllocationMap,
}

/// Append-only allocation history, serialized as a plain event list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    pub events: Vec<AllocationEvent>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed allocation with the current wall-clock time.
    pub fn record(&mut self, group_size: usize, allocation: AllocationMap) {
        self.events.push(AllocationEvent {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            group_size,
            allocation,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
