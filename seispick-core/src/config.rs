//! Plot configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mapping::{DataLimits, PlotDimensions};

/// Configuration for the interactive plot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlotConfig {
    /// Pointer distance (in pixels) under which a point counts as hit.
    pub hit_radius_px: f64,
    /// Decimal digits kept when converting screen positions to data values.
    pub coordinate_decimals: u32,
    /// Data limits before any settings are loaded.
    pub initial_limits: DataLimits,
    /// Viewport size before the first resize.
    pub initial_dimensions: PlotDimensions,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            hit_radius_px: 10.0,
            coordinate_decimals: 6,
            initial_limits: DataLimits::default(),
            initial_dimensions: PlotDimensions::default(),
        }
    }
}

impl PlotConfig {
    /// Creates a new plot configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hit-test radius.
    #[must_use]
    pub fn with_hit_radius(mut self, radius_px: f64) -> Self {
        self.hit_radius_px = radius_px;
        self
    }

    /// Sets the rounding applied to picked coordinates.
    #[must_use]
    pub fn with_coordinate_decimals(mut self, decimals: u32) -> Self {
        self.coordinate_decimals = decimals;
        self
    }

    /// Sets the initial data limits.
    #[must_use]
    pub fn with_initial_limits(mut self, limits: DataLimits) -> Self {
        self.initial_limits = limits;
        self
    }

    /// Sets the initial viewport size.
    #[must_use]
    pub fn with_initial_dimensions(mut self, dimensions: PlotDimensions) -> Self {
        self.initial_dimensions = dimensions;
        self
    }

    /// Checks the configuration for values the plot cannot work with.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] or [`Error::InvalidLimits`].
    pub fn validate(&self) -> Result<()> {
        if !(self.hit_radius_px.is_finite() && self.hit_radius_px > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "hit radius must be positive, got {}",
                self.hit_radius_px
            )));
        }
        if self.coordinate_decimals > 12 {
            return Err(Error::InvalidConfig(format!(
                "coordinate decimals must be at most 12, got {}",
                self.coordinate_decimals
            )));
        }
        if !self.initial_dimensions.is_drawable() {
            return Err(Error::InvalidConfig(
                "initial dimensions must be positive".to_string(),
            ));
        }
        self.initial_limits.validate()
    }
}
