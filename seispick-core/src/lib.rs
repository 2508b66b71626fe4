//! seispick-core: Grid reorientation, coordinate mapping and pick types.
//!
//! This crate provides the pure building blocks of the dispersion picking
//! plot: rectangular sample grids with rotation/flip/arithmetic, the
//! single-pass transformation sequence applier, the orientation matrix that
//! ties axis placement to the active transformations, and screen/data
//! coordinate conversion.
//!

pub mod config;
pub mod error;
pub mod grid;
pub mod mapping;
pub mod orientation;
pub mod pick;
pub mod transform;
pub mod util;

pub use config::PlotConfig;
pub use error::{Error, Result};
pub use grid::{are_grids_equal, Grid};
pub use mapping::{CoordinateMapper, DataLimits, DataLimitsUpdate, PlotDimensions, ScreenPoint};
pub use orientation::{AxisBound, AxisQuantity, OrientationMatrix, ViewTransform};
pub use pick::{PickPoint, PickSet};
pub use transform::{apply_transformation_sequence, ComposedTransform, Transformation};
