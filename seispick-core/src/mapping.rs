//! Screen/data coordinate conversion.
//!
//! [`CoordinateMapper`] linearly maps between viewport pixels and
//! `(frequency, slowness)` values, honouring the axis swap and the flips
//! encoded in the active [`OrientationMatrix`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::orientation::{AxisBound, OrientationMatrix};
use crate::util::round_to_decimals;

/// Domain-space bounding box of the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DataLimits {
    pub freq_min: f64,
    pub freq_max: f64,
    pub slow_min: f64,
    pub slow_max: f64,
}

impl Default for DataLimits {
    fn default() -> Self {
        Self {
            freq_min: 0.0,
            freq_max: 50.0,
            slow_min: 0.0,
            slow_max: 0.015,
        }
    }
}

impl DataLimits {
    /// Limits anchored at zero, as derived from the plot settings.
    pub fn from_maxima(freq_max: f64, slow_max: f64) -> Self {
        Self {
            freq_min: 0.0,
            freq_max,
            slow_min: 0.0,
            slow_max,
        }
    }

    /// Value of one bound.
    pub fn bound(&self, bound: AxisBound) -> f64 {
        match bound {
            AxisBound::SlowMin => self.slow_min,
            AxisBound::SlowMax => self.slow_max,
            AxisBound::FreqMin => self.freq_min,
            AxisBound::FreqMax => self.freq_max,
        }
    }

    /// Checks that both ranges are finite and non-empty.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLimits`] describing the first bad range.
    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("frequency", self.freq_min, self.freq_max),
            ("slowness", self.slow_min, self.slow_max),
        ];
        for (name, lo, hi) in ranges {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(Error::InvalidLimits(format!("{name} range is not finite")));
            }
            if hi <= lo {
                return Err(Error::InvalidLimits(format!(
                    "{name} max {hi} must exceed min {lo}"
                )));
            }
        }
        Ok(())
    }

    /// Applies the fields present in `update`.
    #[must_use]
    pub fn merged(&self, update: &DataLimitsUpdate) -> Self {
        Self {
            freq_min: update.freq_min.unwrap_or(self.freq_min),
            freq_max: update.freq_max.unwrap_or(self.freq_max),
            slow_min: update.slow_min.unwrap_or(self.slow_min),
            slow_max: update.slow_max.unwrap_or(self.slow_max),
        }
    }
}

/// A partial change to [`DataLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataLimitsUpdate {
    pub freq_min: Option<f64>,
    pub freq_max: Option<f64>,
    pub slow_min: Option<f64>,
    pub slow_max: Option<f64>,
}

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for PlotDimensions {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
        }
    }
}

impl PlotDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both extents positive and finite.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A position in viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    pub fn distance(&self, other: &ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Converts between screen pixels and data values for one view state.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper<'a> {
    orientation: &'a OrientationMatrix,
    dimensions: PlotDimensions,
    limits: DataLimits,
    decimals: u32,
}

impl<'a> CoordinateMapper<'a> {
    /// Creates a mapper rounding inverse conversions to 6 decimals.
    pub fn new(
        orientation: &'a OrientationMatrix,
        dimensions: PlotDimensions,
        limits: DataLimits,
    ) -> Self {
        Self {
            orientation,
            dimensions,
            limits,
            decimals: 6,
        }
    }

    /// Overrides the rounding applied by `from_screen_*`.
    #[must_use]
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn orientation(&self) -> &OrientationMatrix {
        self.orientation
    }

    pub fn dimensions(&self) -> PlotDimensions {
        self.dimensions
    }

    pub fn limits(&self) -> DataLimits {
        self.limits
    }

    fn edge(&self, bound: Option<AxisBound>) -> f64 {
        bound.map_or(0.0, |b| self.limits.bound(b))
    }

    /// Data value at the left edge.
    pub fn left(&self) -> f64 {
        self.edge(self.orientation.left())
    }

    /// Data value at the right edge.
    pub fn right(&self) -> f64 {
        self.edge(self.orientation.right())
    }

    /// Data value at the top edge.
    pub fn top(&self) -> f64 {
        self.edge(self.orientation.top())
    }

    /// Data value at the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.edge(self.orientation.bottom())
    }

    fn fraction(value: f64, lo: f64, hi: f64) -> f64 {
        (value - lo) / (hi - lo)
    }

    /// Screen X of a value of the quantity drawn along X.
    pub fn to_screen_x(&self, value: f64) -> f64 {
        let l = &self.limits;
        let t = if self.orientation.is_axis_swapped() {
            Self::fraction(value, l.freq_min, l.freq_max)
        } else {
            Self::fraction(value, l.slow_min, l.slow_max)
        };
        let w = self.dimensions.width;
        if self.orientation.is_flipped_horizontal() {
            t * w
        } else {
            w - t * w
        }
    }

    /// Screen Y of a value of the quantity drawn along Y.
    pub fn to_screen_y(&self, value: f64) -> f64 {
        let l = &self.limits;
        let t = if self.orientation.is_axis_swapped() {
            Self::fraction(value, l.slow_min, l.slow_max)
        } else {
            Self::fraction(value, l.freq_min, l.freq_max)
        };
        let h = self.dimensions.height;
        if self.orientation.is_flipped_vertical() {
            t * h
        } else {
            h - t * h
        }
    }

    /// Data value under screen X, rounded.
    pub fn from_screen_x(&self, x: f64) -> f64 {
        let w = self.dimensions.width;
        let (left, right) = (self.left(), self.right());
        let value = if self.orientation.is_flipped_horizontal() {
            right + ((w - x) / w) * (left - right)
        } else {
            left + (x / w) * (right - left)
        };
        round_to_decimals(value, self.decimals)
    }

    /// Data value under screen Y, rounded.
    pub fn from_screen_y(&self, y: f64) -> f64 {
        let h = self.dimensions.height;
        let (top, bottom) = (self.top(), self.bottom());
        let value = if self.orientation.is_flipped_vertical() {
            bottom + ((h - y) / h) * (top - bottom)
        } else {
            top + (y / h) * (bottom - top)
        };
        round_to_decimals(value, self.decimals)
    }

    /// Screen position of a `(frequency, slowness)` pair.
    pub fn to_screen(&self, frequency: f64, slowness: f64) -> ScreenPoint {
        if self.orientation.is_axis_swapped() {
            ScreenPoint::new(self.to_screen_x(frequency), self.to_screen_y(slowness))
        } else {
            ScreenPoint::new(self.to_screen_x(slowness), self.to_screen_y(frequency))
        }
    }

    /// `(frequency, slowness)` under a screen position.
    pub fn from_screen(&self, point: ScreenPoint) -> (f64, f64) {
        let along_x = self.from_screen_x(point.x);
        let along_y = self.from_screen_y(point.y);
        if self.orientation.is_axis_swapped() {
            (along_x, along_y)
        } else {
            (along_y, along_x)
        }
    }
}
