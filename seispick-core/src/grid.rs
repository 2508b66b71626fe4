//! Rectangular sample grids and the pure operations defined on them.
//!
//! A [`Grid`] stores its samples row-major in a single buffer, so every row
//! has the same length by construction. Reorientation (rotation, flips) works
//! for any `Copy` sample type; arithmetic needs the usual numeric operators.

use std::ops::{Add, Index, IndexMut, Mul};

use crate::error::{Error, Result};

/// A rectangular 2D array of samples, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid<T = f64> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Builds a grid from nested rows.
    ///
    /// # Errors
    /// Returns [`Error::JaggedGrid`] if any row length differs from the first.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(Error::JaggedGrid {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self {
            rows: n_rows,
            cols,
            data,
        })
    }

    /// Builds a grid from a flat row-major buffer and a `(rows, cols)` shape.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if `data.len() != rows * cols`.
    pub fn from_flat(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::ShapeMismatch {
                len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// A `rows` x `cols` grid with `f(row, col)` at each cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Number of rows (the grid height).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (the grid width).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns true if the grid holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at `(row, col)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// One row as a slice.
    ///
    /// # Panics
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterates over rows in order.
    pub fn iter_rows(&self) -> impl DoubleEndedIterator<Item = &[T]> + ExactSizeIterator {
        // chunks_exact panics on zero, and a zero-width grid has no samples anyway.
        let width = self.cols.max(1);
        self.data
            .chunks_exact(width)
            .take(if self.cols == 0 { 0 } else { self.rows })
    }

    /// Row-major view of all samples.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the grid and returns the row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Applies `f` to every sample, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Grid<T> {
    /// A `rows` x `cols` grid with every sample set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Copies the grid into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.iter_rows().map(<[T]>::to_vec).collect()
    }
}

impl<T: Copy> Grid<T> {
    /// Rotates a quarter turn clockwise.
    ///
    /// The result is `cols x rows` and `out[c][rows - 1 - r] = self[r][c]`.
    #[must_use]
    pub fn rotate_clockwise(&self) -> Self {
        let (rows, cols) = self.shape();
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..cols {
            for r in (0..rows).rev() {
                data.push(self.data[r * cols + c]);
            }
        }
        Self {
            rows: cols,
            cols: rows,
            data,
        }
    }

    /// Rotates a quarter turn counter-clockwise.
    ///
    /// The result is `cols x rows` and `out[cols - 1 - c][r] = self[r][c]`.
    #[must_use]
    pub fn rotate_counter_clockwise(&self) -> Self {
        let (rows, cols) = self.shape();
        let mut data = Vec::with_capacity(self.data.len());
        for c in (0..cols).rev() {
            for r in 0..rows {
                data.push(self.data[r * cols + c]);
            }
        }
        Self {
            rows: cols,
            cols: rows,
            data,
        }
    }

    /// Reverses the row order.
    #[must_use]
    pub fn flip_vertical(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.iter_rows().rev() {
            data.extend_from_slice(row);
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Reverses the samples within each row.
    #[must_use]
    pub fn flip_horizontal(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.iter_rows() {
            data.extend(row.iter().rev());
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }
}

#[allow(clippy::should_implement_trait)]
impl<T> Grid<T>
where
    T: Copy + Default + Add<Output = T> + Mul<Output = T>,
{
    /// Multiplies every sample by `factor`.
    #[must_use]
    pub fn scale(&self, factor: T) -> Self {
        self.map(|&v| v * factor)
    }

    /// Elementwise sum.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] unless both grids share a shape.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(Error::DimensionMismatch {
                op: "add",
                left: self.shape(),
                right: other.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a + b)
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Matrix product `self * other`.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if `self.cols() != other.rows()`.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch {
                op: "multiply",
                left: self.shape(),
                right: other.shape(),
            });
        }
        let (n, m, p) = (self.rows, self.cols, other.cols);
        let mut data = vec![T::default(); n * p];
        for i in 0..n {
            for k in 0..m {
                let a = self.data[i * m + k];
                for j in 0..p {
                    let cell = &mut data[i * p + j];
                    *cell = *cell + a * other.data[k * p + j];
                }
            }
        }
        Ok(Self {
            rows: n,
            cols: p,
            data,
        })
    }
}

impl Grid<f64> {
    /// Smallest and largest finite sample, or `None` if there are none.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Compares two grids sample by sample.
///
/// Grids of different shape are never equal. With `epsilon == 0.0` the
/// comparison is exact; otherwise samples may differ by at most `epsilon`.
pub fn are_grids_equal(a: &Grid<f64>, b: &Grid<f64>, epsilon: f64) -> bool {
    if a.shape() != b.shape() {
        return false;
    }
    a.data.iter().zip(&b.data).all(|(&x, &y)| {
        if epsilon == 0.0 {
            x == y
        } else {
            (x - y).abs() <= epsilon
        }
    })
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "grid index ({row}, {col}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "grid index ({row}, {col}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Grid<T> {
    type Error = Error;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Grid;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<T: Serialize> Serialize for Grid<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter_rows())
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for Grid<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let rows = Vec::<Vec<T>>::deserialize(deserializer)?;
            Grid::from_rows(rows).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid<f64> {
        Grid::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_jagged() {
        let err = Grid::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            Error::JaggedGrid {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_from_flat_shape_check() {
        assert!(Grid::from_flat(vec![0.0; 6], 2, 3).is_ok());
        assert!(matches!(
            Grid::from_flat(vec![0.0; 5], 2, 3),
            Err(Error::ShapeMismatch { len: 5, .. })
        ));
    }

    #[test]
    fn test_rotate_clockwise_2x3() {
        let rotated = sample().rotate_clockwise();
        assert_eq!(rotated.shape(), (3, 2));
        assert_eq!(
            rotated.to_rows(),
            vec![vec![4.0, 1.0], vec![5.0, 2.0], vec![6.0, 3.0]]
        );
    }

    #[test]
    fn test_rotate_counter_clockwise_2x3() {
        let rotated = sample().rotate_counter_clockwise();
        assert_eq!(
            rotated.to_rows(),
            vec![vec![3.0, 6.0], vec![2.0, 5.0], vec![1.0, 4.0]]
        );
    }

    #[test]
    fn test_flips() {
        assert_eq!(
            sample().flip_vertical().to_rows(),
            vec![vec![4.0, 5.0, 6.0], vec![1.0, 2.0, 3.0]]
        );
        assert_eq!(
            sample().flip_horizontal().to_rows(),
            vec![vec![3.0, 2.0, 1.0], vec![6.0, 5.0, 4.0]]
        );
    }

    #[test]
    fn test_add_and_scale() {
        let g = sample();
        let sum = g.add(&g.scale(2.0)).unwrap();
        assert_eq!(sum.row(1), &[12.0, 15.0, 18.0]);

        let other = Grid::filled(3, 2, 1.0);
        assert!(matches!(
            g.add(&other),
            Err(Error::DimensionMismatch { op: "add", .. })
        ));
    }

    #[test]
    fn test_multiply() {
        let a = sample();
        let b = Grid::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let product = a.multiply(&b).unwrap();
        assert_eq!(product.to_rows(), vec![vec![4.0, 5.0], vec![10.0, 11.0]]);
        assert!(a.multiply(&a).is_err());
    }

    #[test]
    fn test_integer_multiply() {
        let cw = Grid::from_rows(vec![vec![0, 1], vec![-1, 0]]).unwrap();
        let four = cw
            .multiply(&cw)
            .and_then(|g| g.multiply(&cw))
            .and_then(|g| g.multiply(&cw))
            .unwrap();
        assert_eq!(four.to_rows(), vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn test_integer_grids_are_eq() {
        fn assert_eq_impl<T: Eq>(_: &T) {}
        let g = Grid::from_rows(vec![vec![1i8, -2], vec![0, 2]]).unwrap();
        assert_eq_impl(&g);
        assert_eq!(g.rotate_clockwise().rotate_counter_clockwise(), g);
    }

    #[test]
    fn test_are_grids_equal() {
        let a = sample();
        let b = a.map(|v| v + 1e-9);
        assert!(are_grids_equal(&a, &a, 0.0));
        assert!(!are_grids_equal(&a, &b, 0.0));
        assert!(are_grids_equal(&a, &b, 1e-6));
        assert!(!are_grids_equal(&a, &a.rotate_clockwise(), 1.0));
        assert!(are_grids_equal(&Grid::default(), &Grid::default(), 0.0));
    }

    #[test]
    fn test_min_max_skips_non_finite() {
        let g = Grid::from_rows(vec![vec![f64::NAN, -2.0], vec![7.5, f64::INFINITY]]).unwrap();
        assert_eq!(g.min_max(), Some((-2.0, 7.5)));
        assert_eq!(Grid::<f64>::default().min_max(), None);
    }

    #[test]
    fn test_empty_grid_reorientation() {
        let empty: Grid<f64> = Grid::default();
        assert!(empty.rotate_clockwise().is_empty());
        assert!(empty.flip_horizontal().is_empty());
        assert_eq!(empty.iter_rows().count(), 0);
    }
}
