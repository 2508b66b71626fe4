//! seispick-render: Weighted composition and colour mapping of record grids.
//!
//! Enabled records are blended into one grid by weighted mean, reoriented
//! for the active view, normalised against their own range and pushed
//! through a colour ramp into an RGBA raster.

pub mod colormap;
pub mod compose;
pub mod error;
pub mod texture;
mod util;

pub use colormap::{ColorMaps, ColorRamp, ColorStop, Colormap, Rgb};
pub use compose::{compose, total_weight, Record};
pub use error::{Error, Result};
pub use texture::{generate_texture, render_composition, Texture};
