//! Error types for seispick-render.

use thiserror::Error;

/// Result type alias for seispick-render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while composing or colour-mapping grids.
#[derive(Error, Debug)]
pub enum Error {
    /// The enabled records' weights sum to zero.
    #[error("total weight is 0, cannot create weighted texture")]
    ZeroWeightSum,

    /// Composition was asked for with no enabled record.
    #[error("no enabled records to compose")]
    NoEnabledRecords,

    /// A grid without samples cannot be rasterised.
    #[error("cannot render an empty grid")]
    EmptyGrid,

    /// A colour stop string did not match `rgb(r,g,b, position)`.
    #[error("invalid color stop format: {0}")]
    InvalidColorStop(String),

    /// A ramp needs at least one stop.
    #[error("color ramp {0:?} has no stops")]
    EmptyRamp(String),

    /// No ramp is registered under this name.
    #[error("unknown color map: {0}")]
    UnknownColormap(String),

    /// PNG encoding or file write failure.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error from core grid operations.
    #[error("core error: {0}")]
    Core(#[from] seispick_core::Error),
}
