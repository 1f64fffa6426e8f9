use thiserror::Error;

/// Errors surfaced by map generation.
///
/// Everything here is a caller-input problem: generation itself is a pure,
/// deterministic computation and has nothing to retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("invalid map dimensions {width}x{height}: both sides must be positive")]
    InvalidDimension { width: usize, height: usize },

    #[error("invalid seed {input:?}: {reason}")]
    InvalidSeedFormat { input: String, reason: &'static str },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid threshold table: {0}")]
    InvalidThresholds(String),

    #[error("non-numeric map size: {0:?}")]
    InvalidMapSize(String),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
