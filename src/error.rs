//! Error types for unit resolution and quantity arithmetic.

use crate::dimension::Dimension;

/// Result type for fallible unit and quantity operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for unit resolution and quantity arithmetic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A substring of a unit expression does not resolve to any known
    /// unit/prefix combination.
    #[error("'{0}' is not a valid unit symbol")]
    UnknownSymbol(String),

    /// An operation requiring equal dimensions found unequal ones.
    #[error("dimension mismatch: {left} != {right}")]
    DimensionMismatch {
        /// Dimension of the left-hand (or receiver) operand.
        left: Dimension,
        /// Dimension of the right-hand (or target) operand.
        right: Dimension,
    },

    /// A negative uncertainty was supplied.
    #[error("uncertainty must be non-negative, got {0}")]
    InvalidUncertainty(f64),
}
