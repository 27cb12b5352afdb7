use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::types::RollNumber;

#[derive(Error, Debug)]
pub enum WardenError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(
        "Not enough rooms available: {} placed, {} left unallocated",
        .placed.len(),
        .unplaced.len()
    )]
    CapacityExhausted {
        /// Rolls committed before capacity ran out (roll -> room id).
        placed: BTreeMap<RollNumber, String>,
        /// Rolls that could not be placed anywhere.
        unplaced: Vec<RollNumber>,
    },

    #[error("Malformed state: {0}")]
    MalformedState(String),

    #[error("Malformed layout: {0}")]
    MalformedLayout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Layout parse error: {0}")]
    LayoutParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WardenError>;
