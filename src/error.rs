//! Error type shared by every kernel.
//!
//! Kernels reject bad input at the boundary and otherwise always return a
//! value. Nothing in here is recoverable by retrying.

/// Result alias for kernel entry points.
pub type Result<T> = std::result::Result<T, KernelError>;

/// Caller contract violations detected before any work is done.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    /// Operands of a matrix product have different orders.
    #[error("dimension mismatch: lhs is {lhs}x{lhs}, rhs is {rhs}x{rhs}")]
    DimensionMismatch { lhs: usize, rhs: usize },

    /// Nested input was not square.
    #[error("expected a square matrix, got {rows} rows with a row of length {cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Flat buffer does not hold the number of entries its shape implies.
    #[error("invalid buffer length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Tile edge for the blocked multiply must be at least 1.
    #[error("invalid block size: {0}")]
    InvalidBlockSize(usize),

    /// Softening must be strictly positive and finite.
    #[error("invalid softening: {0} (must be > 0)")]
    InvalidSoftening(f64),

    /// Initializer bounds that would produce an empty sampling range.
    #[error("invalid bounds: box_size={box_size} (must be > 0), max_mass={max_mass} (must be >= 0.1)")]
    InvalidBounds { box_size: f64, max_mass: f64 },
}
