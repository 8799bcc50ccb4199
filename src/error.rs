use thiserror::Error;

use crate::core::traits::FieldLocation;

// Unified error type for mrext

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MreError {
    #[error("operand `{operand}` resides in {found:?} memory, extrapolator requires {expected:?}")]
    Location {
        operand: String,
        expected: FieldLocation,
        found: FieldLocation,
    },
    #[error("trial basis has {trial} vectors but image basis has {image}")]
    BasisMismatch { trial: usize, image: usize },
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("invalid option: {0}")]
    InvalidOption(&'static str),
}
