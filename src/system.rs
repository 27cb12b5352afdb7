//! Top-level allocation system facade
//!
//! Owns the hostel inventory, the history ledger, and the RNG, and is the
//! only mutation path a front-end should use. Single-threaded by design;
//! callers must serialize mutating operations.

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::allocation::engine;
use crate::allocation::history::{AllocationMap, HistoryLog};
use crate::core::error::Result;
use crate::core::types::RollNumber;
use crate::hostel::layout::HostelLayout;
use crate::hostel::registry::Hostel;
use crate::state::{self, SavedState};
use crate::status::{self, HostelStatus};

/// The hostel allocation system
pub struct HostelSystem {
    hostel: Hostel,
    history: HistoryLog,
    rng: ChaCha8Rng,
}

impl HostelSystem {
    /// Build a system from a layout with an OS-entropy RNG.
    pub fn new(layout: &HostelLayout) -> Result<Self> {
        Ok(Self {
            hostel: Hostel::from_layout(layout)?,
            history: HistoryLog::new(),
            rng: ChaCha8Rng::from_entropy(),
        })
    }

    /// Build a system with a fixed seed for reproducible allocation runs.
    pub fn with_seed(layout: &HostelLayout, seed: u64) -> Result<Self> {
        Ok(Self {
            hostel: Hostel::from_layout(layout)?,
            history: HistoryLog::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Allocate one room per roll number and record the event.
    ///
    /// See [`engine::allocate`] for the placement policy and the
    /// partial-commit behavior of `CapacityExhausted`.
    pub fn allocate(
        &mut self,
        group_size: usize,
        rolls: &[RollNumber],
    ) -> Result<AllocationMap> {
        let allocation = engine::allocate(&mut self.hostel, group_size, rolls, &mut self.rng)?;
        self.history.record(group_size, allocation.clone());
        info!(group_size, rooms = allocation.len(), "allocation recorded");
        Ok(allocation)
    }

    /// Current occupancy snapshot, recomputed from live state.
    pub fn status(&self) -> HostelStatus {
        status::hostel_status(&self.hostel)
    }

    /// Discard all claims and the entire history ledger.
    pub fn reset(&mut self) {
        self.hostel.reset();
        self.history.clear();
        info!("system reset to empty layout");
    }

    /// Snapshot the current status and ledger.
    pub fn save_state(&self) -> SavedState {
        SavedState {
            hostel_status: self.status(),
            allocation_history: self.history.clone(),
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        state::save_to_file(path, &self.save_state())
    }

    /// Reset, then rebuild occupancy by replaying the saved ledger.
    pub fn load_state(&mut self, saved: SavedState) -> Result<()> {
        state::restore(&mut self.hostel, &mut self.history, saved)
    }

    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        let saved = state::load_from_file(path)?;
        self.load_state(saved)
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }
}
