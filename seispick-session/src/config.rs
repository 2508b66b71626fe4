//! Session configuration.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use seispick_core::PlotConfig;
use seispick_render::Colormap;

use crate::error::Result;

/// Configuration for a [`PlotSession`](crate::PlotSession).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Plot geometry and hit-testing settings.
    pub plot: PlotConfig,
    /// Name of the colour map selected at start.
    pub colormap: String,
    /// How long notifications stay visible, in milliseconds.
    pub notification_duration_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            plot: PlotConfig::default(),
            colormap: Colormap::default().name().to_string(),
            notification_duration_ms: 5000,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_plot(mut self, plot: PlotConfig) -> Self {
        self.plot = plot;
        self
    }

    #[must_use]
    pub fn with_colormap(mut self, name: impl Into<String>) -> Self {
        self.colormap = name.into();
        self
    }

    #[must_use]
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }

    /// Validates the embedded plot configuration.
    ///
    /// # Errors
    /// Returns the core configuration error.
    pub fn validate(&self) -> Result<()> {
        self.plot.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.colormap, "VsSurf-2");
        assert_eq!(config.notification_duration(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::new()
            .with_colormap("RdGy")
            .with_notification_duration(Duration::from_millis(1500));
        assert_eq!(config.colormap, "RdGy");
        assert_eq!(config.notification_duration_ms, 1500);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"colormap": "Spectral", "plot": {"hit_radius_px": 6.0}}"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.colormap, "Spectral");
        assert!((config.plot.hit_radius_px - 6.0).abs() < f64::EPSILON);
        assert_eq!(config.plot.coordinate_decimals, 6);
        assert_eq!(config.notification_duration_ms, 5000);
    }
}
