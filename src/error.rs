//! Error types shared by maze generation, layout and settings

use thiserror::Error;

/// Errors raised while building a maze or a game from settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    /// A grid needs at least one row and one column
    #[error("invalid maze dimensions: {rows} rows x {cols} columns (both must be at least 1)")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Settings that cannot produce a playable layout
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Deserialized maze data whose shapes do not agree
    #[error("malformed maze: {0}")]
    MalformedMaze(String),

    /// Encoding a maze or layout for output failed
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MazeError {
    fn from(e: serde_json::Error) -> Self {
        MazeError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
