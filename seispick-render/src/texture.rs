//! Colour-mapped raster generation.

use std::path::Path;

use image::RgbaImage;
use log::debug;
use rayon::prelude::*;
use seispick_core::{Grid, ViewTransform};

use crate::colormap::ColorRamp;
use crate::compose::{compose, Record};
use crate::error::{Error, Result};
use crate::util::usize_to_u32;

/// A rendered raster together with the range it was normalised against.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub image: RgbaImage,
    pub min: f64,
    pub max: f64,
}

impl Texture {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Writes the raster as PNG.
    ///
    /// # Errors
    /// Returns [`Error::Image`] if encoding or writing fails.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(Error::from)
    }
}

/// Colour-maps a grid against its own min/max.
///
/// Rows of the grid become rows of the image. A constant grid normalises
/// with a divisor of 1. Alpha is always 255.
///
/// # Errors
/// Returns [`Error::EmptyGrid`] when the grid has no samples.
#[allow(clippy::float_cmp)]
pub fn generate_texture(grid: &Grid<f64>, ramp: &ColorRamp) -> Result<Texture> {
    if grid.is_empty() {
        return Err(Error::EmptyGrid);
    }
    let (rows, cols) = grid.shape();
    let (min, max) = grid.min_max().unwrap_or((0.0, 0.0));
    let range = max - min;
    let divisor = if range == 0.0 { 1.0 } else { range };

    let mut pixels = vec![0u8; rows * cols * 4];
    pixels
        .par_chunks_mut(cols * 4)
        .zip(grid.as_slice().par_chunks(cols))
        .for_each(|(out, row)| {
            for (px, &value) in out.chunks_exact_mut(4).zip(row) {
                px.copy_from_slice(&ramp.apply((value - min) / divisor));
            }
        });

    let image = RgbaImage::from_raw(usize_to_u32(cols), usize_to_u32(rows), pixels)
        .ok_or(Error::EmptyGrid)?;
    Ok(Texture { image, min, max })
}

/// Composes the enabled records, reorients the result for the current view
/// and colour-maps it.
///
/// # Errors
/// Propagates composition errors ([`Error::ZeroWeightSum`] and friends).
pub fn render_composition(
    records: &[Record],
    view: &ViewTransform,
    ramp: &ColorRamp,
) -> Result<Texture> {
    let composed = compose(records)?;
    let oriented = view.apply(&composed);
    debug!(
        "rendering {}x{} texture with {} transformation(s)",
        oriented.rows(),
        oriented.cols(),
        view.transformations().len()
    );
    generate_texture(&oriented, ramp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::Colormap;

    fn gray() -> ColorRamp {
        ColorRamp::parse("gray", &["rgb(0,0,0, 0.0)", "rgb(255,255,255, 1.0)"]).unwrap()
    }

    #[test]
    fn test_normalises_to_own_range() {
        let g = Grid::from_rows(vec![vec![10.0, 15.0], vec![20.0, 10.0]]).unwrap();
        let tex = generate_texture(&g, &gray()).unwrap();
        assert_eq!((tex.width(), tex.height()), (2, 2));
        assert_eq!(tex.image.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(tex.image.get_pixel(1, 0).0, [128, 128, 128, 255]);
        assert_eq!(tex.image.get_pixel(0, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_constant_grid() {
        let g = Grid::filled(3, 2, 4.0);
        let tex = generate_texture(&g, &gray()).unwrap();
        assert!(tex.image.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_empty_grid() {
        let g: Grid<f64> = Grid::filled(0, 0, 0.0);
        assert!(matches!(generate_texture(&g, &gray()), Err(Error::EmptyGrid)));
    }

    #[test]
    fn test_deterministic() {
        let g = Grid::from_fn(17, 9, |r, c| ((r * 31 + c * 7) % 13) as f64);
        let ramp = Colormap::Spectral.ramp().unwrap();
        let a = generate_texture(&g, &ramp).unwrap();
        let b = generate_texture(&g, &ramp).unwrap();
        assert_eq!(a.image.as_raw(), b.image.as_raw());
    }
}
