//! Orientation matrix and the view transform that keeps it in lock-step
//! with the raster.
//!
//! The orientation matrix is a 3x3 grid whose edge cells name the data bound
//! shown on each side of the plot:
//!
//! ```text
//!          [0][1] top
//! [1][0] left      [1][2] right
//!          [2][1] bottom
//! ```
//!
//! Keys: `1` slowness min, `2` slowness max, `-2` frequency min,
//! `-1` frequency max. The same transformation list that reorients the raster
//! is applied to the canonical matrix, so the axes always follow the image.

use log::debug;

use crate::grid::Grid;
use crate::transform::{ComposedTransform, Transformation};

const CANONICAL: [[i8; 3]; 3] = [[0, -1, 0], [2, 0, 1], [0, -2, 0]];

/// One end of one data axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisBound {
    SlowMin,
    SlowMax,
    FreqMin,
    FreqMax,
}

impl AxisBound {
    /// Decodes an orientation key.
    pub fn from_key(key: i8) -> Option<Self> {
        match key {
            1 => Some(AxisBound::SlowMin),
            2 => Some(AxisBound::SlowMax),
            -2 => Some(AxisBound::FreqMin),
            -1 => Some(AxisBound::FreqMax),
            _ => None,
        }
    }

    /// Whether the bound belongs to the frequency axis.
    pub fn is_frequency(self) -> bool {
        matches!(self, AxisBound::FreqMin | AxisBound::FreqMax)
    }
}

/// Which data quantity is drawn along a screen axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisQuantity {
    Frequency,
    Slowness,
}

impl AxisQuantity {
    /// Axis title.
    pub fn label(self) -> &'static str {
        match self {
            AxisQuantity::Frequency => "Frequency",
            AxisQuantity::Slowness => "Slowness",
        }
    }
}

/// 3x3 axis-placement matrix with entries in `{-2, -1, 0, 1, 2}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationMatrix(Grid<i8>);

impl Default for OrientationMatrix {
    fn default() -> Self {
        Self::canonical()
    }
}

impl OrientationMatrix {
    /// Slowness on X (max at left), frequency on Y (max at top).
    pub fn canonical() -> Self {
        Self(Grid::from_fn(3, 3, |r, c| CANONICAL[r][c]))
    }

    /// The canonical matrix reoriented by `composed`.
    pub fn transformed(composed: &ComposedTransform) -> Self {
        Self(composed.apply(&Self::canonical().0))
    }

    /// Raw key at `(row, col)`.
    pub fn key(&self, row: usize, col: usize) -> i8 {
        self.0.get(row, col).copied().unwrap_or(0)
    }

    /// The matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<i8>> {
        self.0.to_rows()
    }

    /// Bound shown at the left edge.
    pub fn left(&self) -> Option<AxisBound> {
        AxisBound::from_key(self.key(1, 0))
    }

    /// Bound shown at the right edge.
    pub fn right(&self) -> Option<AxisBound> {
        AxisBound::from_key(self.key(1, 2))
    }

    /// Bound shown at the top edge.
    pub fn top(&self) -> Option<AxisBound> {
        AxisBound::from_key(self.key(0, 1))
    }

    /// Bound shown at the bottom edge.
    pub fn bottom(&self) -> Option<AxisBound> {
        AxisBound::from_key(self.key(2, 1))
    }

    /// Frequency runs along screen X.
    pub fn is_axis_swapped(&self) -> bool {
        self.key(1, 0) < 0
    }

    /// Values increase left to right.
    pub fn is_flipped_horizontal(&self) -> bool {
        self.key(1, 0) < self.key(1, 2)
    }

    /// Values increase top to bottom.
    pub fn is_flipped_vertical(&self) -> bool {
        self.key(0, 1) < self.key(2, 1)
    }

    /// Quantity on screen X.
    pub fn x_quantity(&self) -> AxisQuantity {
        if self.is_axis_swapped() {
            AxisQuantity::Frequency
        } else {
            AxisQuantity::Slowness
        }
    }

    /// Quantity on screen Y.
    pub fn y_quantity(&self) -> AxisQuantity {
        if self.is_axis_swapped() {
            AxisQuantity::Slowness
        } else {
            AxisQuantity::Frequency
        }
    }
}

/// The active transformation list together with everything derived from it.
///
/// The composed remap and the orientation matrix are rebuilt from the list
/// on every change, so the raster and the axes cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewTransform {
    transformations: Vec<Transformation>,
    composed: ComposedTransform,
    orientation: OrientationMatrix,
}

impl ViewTransform {
    /// No transformations; canonical orientation.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Builds the view for a transformation list.
    ///
    /// A non-empty list whose result equals the canonical orientation is
    /// cleared.
    pub fn from_transformations(transformations: Vec<Transformation>) -> Self {
        let composed = ComposedTransform::from_sequence(&transformations);
        let orientation = OrientationMatrix::transformed(&composed);
        if !transformations.is_empty() && orientation == OrientationMatrix::canonical() {
            debug!(
                "{} transformations net to identity; resetting view",
                transformations.len()
            );
            return Self::identity();
        }
        Self {
            transformations,
            composed,
            orientation,
        }
    }

    /// Appends one transformation and rebuilds the view.
    pub fn push(&mut self, transformation: Transformation) {
        let mut list = std::mem::take(&mut self.transformations);
        list.push(transformation);
        *self = Self::from_transformations(list);
    }

    /// Drops every transformation.
    pub fn clear(&mut self) {
        *self = Self::identity();
    }

    /// The active list, in the order it was built.
    pub fn transformations(&self) -> &[Transformation] {
        &self.transformations
    }

    /// The collapsed remap.
    pub fn composed(&self) -> &ComposedTransform {
        &self.composed
    }

    /// The derived orientation matrix.
    pub fn orientation(&self) -> &OrientationMatrix {
        &self.orientation
    }

    /// Whether no transformation is active.
    pub fn is_identity(&self) -> bool {
        self.transformations.is_empty()
    }

    /// Reorients a grid to match the current axes.
    #[must_use]
    pub fn apply<T: Copy + Default>(&self, grid: &Grid<T>) -> Grid<T> {
        if self.is_identity() {
            grid.clone()
        } else {
            self.composed.apply(grid)
        }
    }

    /// The grid-level flip that mirrors the displayed image left-right.
    ///
    /// Flips are applied before the net rotation, so with an odd number of
    /// quarter turns the source rows run along screen X.
    pub fn screen_flip_horizontal(&self) -> Transformation {
        if self.orientation.is_axis_swapped() {
            Transformation::FlipVertical
        } else {
            Transformation::FlipHorizontal
        }
    }

    /// The grid-level flip that mirrors the displayed image top-bottom.
    pub fn screen_flip_vertical(&self) -> Transformation {
        if self.orientation.is_axis_swapped() {
            Transformation::FlipHorizontal
        } else {
            Transformation::FlipVertical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Transformation::{FlipHorizontal, FlipVertical, RotateClockwise, RotateCounterClockwise};

    #[test]
    fn test_canonical_layout() {
        let m = OrientationMatrix::canonical();
        assert_eq!(m.to_rows(), vec![vec![0, -1, 0], vec![2, 0, 1], vec![0, -2, 0]]);
        assert_eq!(m.left(), Some(AxisBound::SlowMax));
        assert_eq!(m.right(), Some(AxisBound::SlowMin));
        assert_eq!(m.top(), Some(AxisBound::FreqMax));
        assert_eq!(m.bottom(), Some(AxisBound::FreqMin));
        assert!(!m.is_axis_swapped());
        assert!(!m.is_flipped_horizontal());
        assert!(!m.is_flipped_vertical());
    }

    #[test]
    fn test_clockwise_swaps_axes() {
        let view = ViewTransform::from_transformations(vec![RotateClockwise]);
        let m = view.orientation();
        assert_eq!(m.to_rows(), vec![vec![0, 2, 0], vec![-2, 0, -1], vec![0, 1, 0]]);
        assert!(m.is_axis_swapped());
        assert!(m.is_flipped_horizontal());
        assert!(!m.is_flipped_vertical());
        assert_eq!(m.x_quantity(), AxisQuantity::Frequency);
    }

    #[test]
    fn test_identity_reset() {
        let mut view = ViewTransform::identity();
        view.push(RotateClockwise);
        view.push(RotateClockwise);
        view.push(RotateCounterClockwise);
        assert_eq!(view.transformations().len(), 3);
        view.push(RotateCounterClockwise);
        assert!(view.is_identity());
        assert_eq!(view.orientation(), &OrientationMatrix::canonical());

        view.push(FlipVertical);
        view.push(FlipVertical);
        assert!(view.transformations().is_empty());
    }

    #[test]
    fn test_screen_flips_follow_swap() {
        let mut view = ViewTransform::identity();
        assert_eq!(view.screen_flip_horizontal(), FlipHorizontal);
        view.push(RotateClockwise);
        assert_eq!(view.screen_flip_horizontal(), FlipVertical);

        // Mirroring along screen X leaves the Y axis alone.
        let before_top = view.orientation().top();
        view.push(view.screen_flip_horizontal());
        assert_eq!(view.orientation().top(), before_top);
        assert!(!view.orientation().is_flipped_horizontal());
    }
}
