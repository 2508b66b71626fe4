//! Weighted composition of record grids.

use log::debug;
use seispick_core::{Error as CoreError, Grid};

use crate::error::{Error, Result};

/// One processed grid as shown in the record list.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub grid: Grid<f64>,
    /// Relative contribution; any finite value is accepted.
    pub weight: f64,
    pub enabled: bool,
    /// Smallest finite sample.
    pub min: f64,
    /// Largest finite sample.
    pub max: f64,
}

impl Record {
    /// An enabled record with weight 1.
    pub fn new(name: impl Into<String>, grid: Grid<f64>) -> Self {
        let (min, max) = grid.min_max().unwrap_or((0.0, 0.0));
        Self {
            name: name.into(),
            grid,
            weight: 1.0,
            enabled: true,
            min,
            max,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }
}

/// Sum of the enabled records' weights.
pub fn total_weight(records: &[Record]) -> f64 {
    records.iter().filter(|r| r.enabled).map(|r| r.weight).sum()
}

/// Weighted mean of the enabled records:
/// `out[i][j] = sum(grid_k[i][j] * weight_k) / sum(weight_k)`.
///
/// The first enabled record fixes the output shape.
///
/// # Errors
/// - [`Error::NoEnabledRecords`] when nothing is enabled.
/// - [`Error::ZeroWeightSum`] when the weights cancel out.
/// - [`Error::Core`] with a dimension mismatch when shapes differ.
#[allow(clippy::float_cmp)]
pub fn compose(records: &[Record]) -> Result<Grid<f64>> {
    let mut enabled = records.iter().filter(|r| r.enabled).peekable();
    let first = enabled.peek().ok_or(Error::NoEnabledRecords)?;
    let (rows, cols) = first.shape();

    let total = total_weight(records);
    if total == 0.0 {
        return Err(Error::ZeroWeightSum);
    }

    let mut acc = Grid::filled(rows, cols, 0.0);
    for record in enabled {
        if record.shape() != (rows, cols) {
            return Err(CoreError::DimensionMismatch {
                op: "compose",
                left: (rows, cols),
                right: record.shape(),
            }
            .into());
        }
        let w = record.weight;
        acc = acc.add(&record.grid.map(|&v| v * w / total))?;
    }
    debug!("composed {rows}x{cols} grid with total weight {total}");
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<f64>>) -> Grid<f64> {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_record_min_max() {
        let r = Record::new("a", grid(vec![vec![3.0, -1.0], vec![f64::NAN, 7.5]]));
        assert!((r.min + 1.0).abs() < f64::EPSILON);
        assert!((r.max - 7.5).abs() < f64::EPSILON);
        assert!(r.enabled);
    }

    #[test]
    fn test_disabled_records_ignored() {
        let records = vec![
            Record::new("a", grid(vec![vec![2.0]])).with_weight(3.0),
            Record::new("b", grid(vec![vec![100.0, 1.0]])).with_enabled(false),
        ];
        let out = compose(&records).unwrap();
        assert_eq!(out.to_rows(), vec![vec![2.0]]);
    }

    #[test]
    fn test_no_enabled_records() {
        let records = vec![Record::new("a", grid(vec![vec![2.0]])).with_enabled(false)];
        assert!(matches!(compose(&records), Err(Error::NoEnabledRecords)));
    }

    #[test]
    fn test_opposite_weights_cancel() {
        let records = vec![
            Record::new("a", grid(vec![vec![1.0]])).with_weight(2.0),
            Record::new("b", grid(vec![vec![1.0]])).with_weight(-2.0),
        ];
        assert!(matches!(compose(&records), Err(Error::ZeroWeightSum)));
    }

    #[test]
    fn test_shape_mismatch() {
        let records = vec![
            Record::new("a", grid(vec![vec![1.0, 2.0]])),
            Record::new("b", grid(vec![vec![1.0], vec![2.0]])),
        ];
        assert!(matches!(
            compose(&records),
            Err(Error::Core(CoreError::DimensionMismatch { .. }))
        ));
    }
}
