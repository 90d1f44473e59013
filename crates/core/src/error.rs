//! Construction errors.
//!
//! Gameplay never fails: blocked spawns, blocked moves and rejected rotations
//! are ordinary return values. Only malformed configuration is an error, and
//! it is rejected before a game can start.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Grid width or height is zero.
    InvalidDimensions { width: u16, height: u16 },
    /// A mask's cell count does not match its declared size.
    MaskSizeMismatch {
        width: usize,
        height: usize,
        cells: usize,
    },
    /// A template is wider or taller than the engine supports.
    PieceTooLarge { width: usize, height: usize },
    /// A mask has no solid cell, or a zero dimension.
    InvalidMask(String),
    /// The catalog holds no templates.
    EmptyCatalog,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {}x{}", width, height)
            }
            CoreError::MaskSizeMismatch {
                width,
                height,
                cells,
            } => write!(
                f,
                "mask declared as {}x{} but has {} cells (expected {})",
                width,
                height,
                cells,
                width * height
            ),
            CoreError::PieceTooLarge { width, height } => write!(
                f,
                "piece {}x{} exceeds the maximum extent of {}",
                width,
                height,
                crate::types::MAX_PIECE_EXTENT
            ),
            CoreError::InvalidMask(msg) => write!(f, "invalid mask: {}", msg),
            CoreError::EmptyCatalog => write!(f, "piece catalog is empty"),
        }
    }
}

impl std::error::Error for CoreError {}
