//! The project backend contract and its wire types.

use serde::{Deserialize, Serialize};
use seispick_core::{DataLimits, Grid, PickPoint};

use crate::error::Result;

/// One receiver position of the survey geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryItem {
    pub index: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Per-record display options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOption {
    pub id: String,
    pub enabled: bool,
    pub weight: f64,
    pub file_name: String,
}

/// Frequency and slowness axis settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotLimits {
    pub num_freq: u32,
    pub max_freq: f64,
    pub num_slow: u32,
    pub max_slow: f64,
}

impl Default for PlotLimits {
    fn default() -> Self {
        Self {
            num_freq: 50,
            max_freq: 50.0,
            num_slow: 50,
            max_slow: 0.015,
        }
    }
}

impl PlotLimits {
    /// Data limits anchored at zero.
    pub fn data_limits(&self) -> DataLimits {
        DataLimits::from_maxima(self.max_freq, self.max_slow)
    }
}

/// Stored plot settings of a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOptions {
    #[serde(default)]
    pub geometry: Vec<GeometryItem>,
    #[serde(default)]
    pub records: Vec<RecordOption>,
    #[serde(default)]
    pub plot_limits: PlotLimits,
}

/// Parameters of a grid processing run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessGridsRequest {
    pub project_id: String,
    /// JSON-encoded record options.
    pub record_options: String,
    /// JSON-encoded geometry.
    pub geometry_data: String,
    pub max_slowness: f64,
    pub max_frequency: f64,
    pub num_slow_points: u32,
    pub num_freq_points: u32,
    pub return_freq_and_slow: bool,
}

impl ProcessGridsRequest {
    /// Builds a request from stored options.
    ///
    /// # Errors
    /// Fails only if the options cannot be encoded as JSON.
    pub fn from_options(project_id: &str, options: &ProjectOptions) -> Result<Self> {
        Ok(Self {
            project_id: project_id.to_string(),
            record_options: serde_json::to_string(&options.records)?,
            geometry_data: serde_json::to_string(&options.geometry)?,
            max_slowness: options.plot_limits.max_slow,
            max_frequency: options.plot_limits.max_freq,
            num_slow_points: options.plot_limits.num_slow,
            num_freq_points: options.plot_limits.num_freq,
            return_freq_and_slow: true,
        })
    }

    /// Multipart form fields in submission order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("record_options", self.record_options.clone()),
            ("geometry_data", self.geometry_data.clone()),
            ("max_slowness", self.max_slowness.to_string()),
            ("max_frequency", self.max_frequency.to_string()),
            ("num_slow_points", self.num_slow_points.to_string()),
            ("num_freq_points", self.num_freq_points.to_string()),
            ("return_freq_and_slow", self.return_freq_and_slow.to_string()),
            ("project_id", self.project_id.clone()),
        ]
    }
}

/// One grid as returned by the processing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedGrid {
    pub name: String,
    pub data: Vec<Vec<f64>>,
    #[serde(default)]
    pub shape: Vec<usize>,
}

impl NamedGrid {
    /// The samples as a rectangular grid.
    ///
    /// # Errors
    /// Returns a core error for jagged rows.
    pub fn to_grid(&self) -> Result<Grid<f64>> {
        Ok(Grid::from_rows(self.data.clone())?)
    }
}

/// Sample positions along one axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSamples {
    pub data: Vec<f64>,
}

/// Result of a grid processing run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessedGrids {
    pub grids: Vec<NamedGrid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq: Option<AxisSamples>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow: Option<AxisSamples>,
}

/// Envelope the processing endpoint wraps its payload in.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Remote storage and processing for a project.
///
/// Implementations block; callers that must stay responsive run them on a
/// worker thread.
pub trait ProjectBackend: Send + Sync {
    /// Stored plot settings.
    fn get_options(&self, project_id: &str) -> Result<ProjectOptions>;

    /// Replaces the stored plot settings.
    fn save_options(&self, project_id: &str, options: &ProjectOptions) -> Result<()>;

    /// Stored picks, in order.
    fn get_picks(&self, project_id: &str) -> Result<Vec<PickPoint>>;

    /// Replaces the stored picks.
    fn save_picks(&self, project_id: &str, points: &[PickPoint]) -> Result<()>;

    /// Runs grid processing with the given parameters.
    fn process_grids(&self, request: &ProcessGridsRequest) -> Result<ProcessedGrids>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_wire_names() {
        let json = r#"{
            "geometry": [{"index": 1, "x": 0.0, "y": 2.5, "z": 0.0}],
            "records": [{"id": "r1", "enabled": true, "weight": 50, "fileName": "a.sgy"}],
            "plotLimits": {"numFreq": 60, "maxFreq": 80.0, "numSlow": 40, "maxSlow": 0.02}
        }"#;
        let options: ProjectOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.records[0].file_name, "a.sgy");
        assert_eq!(options.plot_limits.num_freq, 60);
        let limits = options.plot_limits.data_limits();
        assert!((limits.freq_max - 80.0).abs() < f64::EPSILON);
        assert!(limits.slow_min.abs() < f64::EPSILON);

        let back = serde_json::to_value(&options).unwrap();
        assert!(back.get("plotLimits").is_some());
    }

    #[test]
    fn test_picks_wire_shape() {
        let json = r#"[{"d1":0,"d2":0,"frequency":12.5,"d3":0,"slowness":0.004,"d4":0,"d5":0}]"#;
        let points: Vec<PickPoint> = serde_json::from_str(json).unwrap();
        assert!((points[0].frequency - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_processed_grids_optional_axes() {
        let json = r#"{"grids": [{"name": "g", "data": [[1, 2], [3, 4]], "shape": [2, 2]}]}"#;
        let out: ProcessedGrids = serde_json::from_str(json).unwrap();
        assert!(out.freq.is_none());
        assert_eq!(out.grids[0].to_grid().unwrap().shape(), (2, 2));
    }

    #[test]
    fn test_request_form_fields() {
        let request = ProcessGridsRequest::from_options("p1", &ProjectOptions::default()).unwrap();
        let fields = request.form_fields();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0], ("record_options", "[]".to_string()));
        assert_eq!(fields[6], ("return_freq_and_slow", "true".to_string()));
        assert_eq!(fields[7], ("project_id", "p1".to_string()));
    }
}
