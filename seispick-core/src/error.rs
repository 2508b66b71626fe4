//! Error types for seispick-core.

use thiserror::Error;

/// Result type alias for seispick-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for grid and coordinate operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Grid arithmetic on incompatible shapes.
    #[error(
        "dimension mismatch in {op}: {}x{} vs {}x{}",
        left.0, left.1, right.0, right.1
    )]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A row whose length differs from the first row.
    #[error("jagged grid: row {row} has {found} columns, expected {expected}")]
    JaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Flat sample buffer does not match the declared shape.
    #[error("{len} samples do not fit a {rows}x{cols} grid")]
    ShapeMismatch { len: usize, rows: usize, cols: usize },

    /// Transformation name not in the supported set.
    #[error("unknown transformation: {0}")]
    UnknownTransformation(String),

    /// Degenerate or non-finite data limits.
    #[error("invalid data limits: {0}")]
    InvalidLimits(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}
