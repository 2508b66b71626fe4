//! Named grid transformations and the single-pass sequence applier.
//!
//! A transformation list is folded into one integer 2x2 map plus a net count
//! of clockwise quarter turns. The map is lifted to homogeneous coordinates,
//! anchored so every destination index is non-negative, and applied in one
//! remap pass over the source grid.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::grid::Grid;
use crate::util::{i64_to_index, usize_to_i64};

type Linear2 = [[i32; 2]; 2];

const IDENTITY: Linear2 = [[1, 0], [0, 1]];
const ROTATE_CW: Linear2 = [[0, 1], [-1, 0]];
// Flips act on (row, col) index pairs: vertical negates the row index,
// horizontal negates the column index.
const FLIP_VERTICAL: Linear2 = [[-1, 0], [0, 1]];
const FLIP_HORIZONTAL: Linear2 = [[1, 0], [0, -1]];

/// One of the supported grid reorientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Transformation {
    /// Quarter turn clockwise.
    RotateClockwise,
    /// Quarter turn counter-clockwise.
    RotateCounterClockwise,
    /// Reverse each row.
    FlipHorizontal,
    /// Reverse the row order.
    FlipVertical,
}

impl Transformation {
    /// Every transformation, in declaration order.
    pub const ALL: [Transformation; 4] = [
        Transformation::RotateClockwise,
        Transformation::RotateCounterClockwise,
        Transformation::FlipHorizontal,
        Transformation::FlipVertical,
    ];

    /// The camelCase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Transformation::RotateClockwise => "rotateClockwise",
            Transformation::RotateCounterClockwise => "rotateCounterClockwise",
            Transformation::FlipHorizontal => "flipHorizontal",
            Transformation::FlipVertical => "flipVertical",
        }
    }

    /// Whether this is one of the two rotations.
    pub fn is_rotation(self) -> bool {
        matches!(
            self,
            Transformation::RotateClockwise | Transformation::RotateCounterClockwise
        )
    }

    /// Applies this single step to a grid.
    #[must_use]
    pub fn apply<T: Copy>(self, grid: &Grid<T>) -> Grid<T> {
        match self {
            Transformation::RotateClockwise => grid.rotate_clockwise(),
            Transformation::RotateCounterClockwise => grid.rotate_counter_clockwise(),
            Transformation::FlipHorizontal => grid.flip_horizontal(),
            Transformation::FlipVertical => grid.flip_vertical(),
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transformation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transformation::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownTransformation(s.to_string()))
    }
}

fn mul2(a: Linear2, b: Linear2) -> Linear2 {
    let mut out = [[0; 2]; 2];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    out
}

/// A transformation list collapsed into one index remap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposedTransform {
    linear: Linear2,
    quarter_turns: u8,
}

impl Default for ComposedTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ComposedTransform {
    /// The no-op remap.
    pub const IDENTITY: ComposedTransform = ComposedTransform {
        linear: IDENTITY,
        quarter_turns: 0,
    };

    /// Folds an ordered transformation list.
    ///
    /// Flips are left-multiplied in list order. Rotations only contribute to
    /// the net quarter-turn count (`+1` clockwise, `-1` counter-clockwise,
    /// modulo 4), which is applied after all flips.
    pub fn from_sequence(ops: &[Transformation]) -> Self {
        let mut linear = IDENTITY;
        let mut turns: i32 = 0;
        for op in ops {
            match op {
                Transformation::RotateClockwise => turns += 1,
                Transformation::RotateCounterClockwise => turns -= 1,
                Transformation::FlipVertical => linear = mul2(FLIP_VERTICAL, linear),
                Transformation::FlipHorizontal => linear = mul2(FLIP_HORIZONTAL, linear),
            }
        }
        let quarter_turns = u8::try_from(turns.rem_euclid(4)).unwrap_or(0);
        for _ in 0..quarter_turns {
            linear = mul2(ROTATE_CW, linear);
        }
        Self {
            linear,
            quarter_turns,
        }
    }

    /// The combined 2x2 map acting on `(row, col)` indices.
    pub fn linear(&self) -> [[i32; 2]; 2] {
        self.linear
    }

    /// Net clockwise quarter turns, in `0..4`.
    pub fn quarter_turns(&self) -> u8 {
        self.quarter_turns
    }

    /// Whether the remap leaves every cell in place.
    pub fn is_identity(&self) -> bool {
        self.linear == IDENTITY
    }

    /// Destination `(rows, cols)` for a `rows x cols` source.
    pub fn output_shape(&self, rows: usize, cols: usize) -> (usize, usize) {
        if self.quarter_turns % 2 == 1 {
            (cols, rows)
        } else {
            (rows, cols)
        }
    }

    /// The 3x3 homogeneous matrix for a `rows x cols` source.
    ///
    /// Each negative coefficient contributes the matching extent to the
    /// translation column, which keeps destination indices non-negative.
    pub fn homogeneous(&self, rows: usize, cols: usize) -> [[i64; 3]; 3] {
        let extent = [
            usize_to_i64(rows.saturating_sub(1)),
            usize_to_i64(cols.saturating_sub(1)),
        ];
        let mut out = [[0i64; 3]; 3];
        for (r, row) in self.linear.iter().enumerate() {
            let mut offset = 0;
            for (c, &coef) in row.iter().enumerate() {
                out[r][c] = i64::from(coef);
                if coef == -1 {
                    offset += extent[c];
                }
            }
            out[r][2] = offset;
        }
        out[2][2] = 1;
        out
    }

    /// Remaps `grid` in a single pass.
    ///
    /// Cells whose destination falls outside the output are dropped.
    #[must_use]
    pub fn apply<T: Copy + Default>(&self, grid: &Grid<T>) -> Grid<T> {
        let (rows, cols) = grid.shape();
        let (out_rows, out_cols) = self.output_shape(rows, cols);
        let h = self.homogeneous(rows, cols);
        let mut out = Grid::filled(out_rows, out_cols, T::default());
        for (i, row) in grid.iter_rows().enumerate() {
            let si = usize_to_i64(i);
            for (j, &value) in row.iter().enumerate() {
                let sj = usize_to_i64(j);
                let x = h[0][0] * si + h[0][1] * sj + h[0][2];
                let y = h[1][0] * si + h[1][1] * sj + h[1][2];
                if let (Some(x), Some(y)) = (i64_to_index(x, out_rows), i64_to_index(y, out_cols))
                {
                    out[(x, y)] = value;
                }
            }
        }
        out
    }
}

/// Applies a transformation list to a grid in one remap pass.
///
/// An empty list returns an unchanged copy.
#[must_use]
pub fn apply_transformation_sequence<T: Copy + Default>(
    grid: &Grid<T>,
    ops: &[Transformation],
) -> Grid<T> {
    if ops.is_empty() {
        return grid.clone();
    }
    ComposedTransform::from_sequence(ops).apply(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Transformation::{FlipHorizontal, FlipVertical, RotateClockwise, RotateCounterClockwise};

    fn sample() -> Grid<f64> {
        Grid::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_names_round_trip() {
        for t in Transformation::ALL {
            assert_eq!(t.as_str().parse::<Transformation>().unwrap(), t);
        }
        assert!(matches!(
            "spin".parse::<Transformation>(),
            Err(Error::UnknownTransformation(_))
        ));
    }

    #[test]
    fn test_single_steps_match_grid_ops() {
        let g = sample();
        for t in Transformation::ALL {
            assert_eq!(apply_transformation_sequence(&g, &[t]), t.apply(&g), "{t}");
        }
    }

    #[test]
    fn test_net_rotation_collapses() {
        let composed = ComposedTransform::from_sequence(&[
            RotateClockwise,
            RotateClockwise,
            RotateCounterClockwise,
            RotateClockwise,
            RotateClockwise,
            RotateClockwise,
        ]);
        assert_eq!(composed.quarter_turns(), 0);
        assert!(composed.is_identity());
    }

    #[test]
    fn test_output_shape() {
        let cw = ComposedTransform::from_sequence(&[RotateClockwise]);
        assert_eq!(cw.output_shape(2, 3), (3, 2));
        let half = ComposedTransform::from_sequence(&[RotateClockwise, RotateClockwise]);
        assert_eq!(half.output_shape(2, 3), (2, 3));
    }

    #[test]
    fn test_homogeneous_anchor() {
        let cw = ComposedTransform::from_sequence(&[RotateClockwise]);
        assert_eq!(cw.homogeneous(2, 3), [[0, 1, 0], [-1, 0, 1], [0, 0, 1]]);
    }

    #[test]
    fn test_flips_before_rotation() {
        // Flips fold first; the net rotation is applied on top.
        let g = sample();
        let got = apply_transformation_sequence(&g, &[RotateClockwise, FlipVertical]);
        assert_eq!(got, g.flip_vertical().rotate_clockwise());
    }

    #[test]
    fn test_double_flip_is_half_turn() {
        let g = sample();
        let got = apply_transformation_sequence(&g, &[FlipVertical, FlipHorizontal]);
        assert_eq!(got, g.rotate_clockwise().rotate_clockwise());
    }

    #[test]
    fn test_integer_grid() {
        let g = Grid::from_rows(vec![vec![1i8, 2], vec![3, 4]]).unwrap();
        let got = apply_transformation_sequence(&g, &[RotateCounterClockwise]);
        assert_eq!(got.to_rows(), vec![vec![2, 4], vec![1, 3]]);
    }
}
