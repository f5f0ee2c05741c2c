//! Error types for the rules engine and its configuration.

use thiserror::Error;

use crate::types::CellPos;

/// Errors returned by fallible engine operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid layout id {0} (expected 1..=6)")]
    InvalidLayout(u8),
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i8, y: i8 },
    #[error("cell ({x}, {y}) is already occupied")]
    CellOccupied { x: i8, y: i8 },
}

impl EngineError {
    pub(crate) fn out_of_bounds(pos: CellPos) -> Self {
        EngineError::OutOfBounds { x: pos.x, y: pos.y }
    }

    pub(crate) fn occupied(pos: CellPos) -> Self {
        EngineError::CellOccupied { x: pos.x, y: pos.y }
    }
}

/// Errors raised while loading an [`EngineConfig`](crate::EngineConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
