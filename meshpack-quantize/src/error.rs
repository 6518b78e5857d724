//! Error types for quantization parameter computation.

use thiserror::Error;

/// Result type for quantization parameter computation.
pub type QuantizeResult<T> = Result<T, QuantizeError>;

/// Errors that can occur while deriving quantization parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantizeError {
    /// The grid spacing was negative.
    #[error("negative grid delta")]
    NegativeGridDelta,

    /// The mesh carries no position values to scan.
    #[error("mesh has no position attribute values")]
    MissingPositionAttribute,

    /// The position attribute is not a 3-component attribute.
    #[error("the position attribute does not have 3 values (got {found})")]
    PositionComponentCount {
        /// Component count actually found.
        found: usize,
    },
}
