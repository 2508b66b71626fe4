//! The plotting session controller.
//!
//! [`PlotSession`] owns every piece of mutable plot state: the pick set, the
//! view transform, data limits, viewport size, loaded records, colour maps,
//! the current texture and the notification queue. Local edits apply
//! synchronously. Backend calls run on worker threads and come back as
//! [`SessionMessage`]s that [`PlotSession::poll`] applies in arrival order.

use std::path::Path;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use seispick_core::{
    AxisQuantity, CoordinateMapper, DataLimits, DataLimitsUpdate, PickPoint, PickSet,
    PlotDimensions, ScreenPoint, Transformation, ViewTransform,
};
use seispick_io::{
    format_picks, parse_picks, read_pick_file, write_pick_file, Delimiter, Error as IoError,
    GeometryItem, PlotLimits, ProcessGridsRequest, ProcessedGrids, ProjectBackend,
    ProjectOptions, RecordOption,
};
use seispick_render::{render_composition, ColorMaps, Error as RenderError, Record, Texture};

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::interaction::{hit_test, PickInteraction, PointerInput, PointerOutcome};
use crate::message::SessionMessage;
use crate::notification::{NotificationKind, Notification, Notifications};
use crate::worker::{spawn_request, BackendRequest};

const SHORT_NOTICE: Duration = Duration::from_millis(3000);
const LONG_NOTICE: Duration = Duration::from_millis(7000);

const MSG_PROCESSING_FAILED: &str = "Error processing files. Please try again.";

/// Choice offered when a pick file is uploaded over existing points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadDecision {
    /// Append the uploaded points after the existing ones.
    Merge,
    /// Replace the existing points.
    Replace,
    /// Drop the upload.
    Cancel,
}

/// Result of an upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The point set was empty; the upload was applied.
    Applied(usize),
    /// Existing points; waiting for an [`UploadDecision`].
    Pending(usize),
    /// Nothing usable was uploaded.
    Rejected,
}

fn mapper_for<'a>(
    view: &'a ViewTransform,
    dimensions: PlotDimensions,
    limits: DataLimits,
    decimals: u32,
) -> CoordinateMapper<'a> {
    CoordinateMapper::new(view.orientation(), dimensions, limits).with_decimals(decimals)
}

/// State of one interactive plot.
pub struct PlotSession {
    config: SessionConfig,
    project_id: Option<String>,
    backend: Option<Arc<dyn ProjectBackend>>,

    points: PickSet,
    interaction: PickInteraction,
    pending_upload: Option<Vec<PickPoint>>,

    view: ViewTransform,
    limits: DataLimits,
    dimensions: PlotDimensions,

    options: ProjectOptions,
    records: Vec<Record>,
    frequency_samples: Option<Vec<f64>>,
    slowness_samples: Option<Vec<f64>>,

    colormaps: ColorMaps,
    selected_colormap: String,
    texture: Option<Texture>,

    notifications: Notifications,

    tx: Sender<SessionMessage>,
    rx: Receiver<SessionMessage>,
    in_flight: usize,
}

impl PlotSession {
    /// Creates an offline session.
    ///
    /// # Errors
    /// Fails when the configuration is invalid or names an unknown colour map.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let colormaps = ColorMaps::with_presets()?;
        colormaps.get(&config.colormap)?;
        let (tx, rx) = channel();
        Ok(Self {
            project_id: None,
            backend: None,
            points: PickSet::new(),
            interaction: PickInteraction::new(config.plot.hit_radius_px),
            pending_upload: None,
            view: ViewTransform::identity(),
            limits: config.plot.initial_limits,
            dimensions: config.plot.initial_dimensions,
            options: ProjectOptions::default(),
            records: Vec::new(),
            frequency_samples: None,
            slowness_samples: None,
            colormaps,
            selected_colormap: config.colormap.clone(),
            texture: None,
            notifications: Notifications::new(config.notification_duration()),
            tx,
            rx,
            in_flight: 0,
            config,
        })
    }

    /// Attaches a backend for project `project_id`.
    #[must_use]
    pub fn with_backend(
        mut self,
        backend: Arc<dyn ProjectBackend>,
        project_id: impl Into<String>,
    ) -> Self {
        self.backend = Some(backend);
        self.project_id = Some(project_id.into());
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    // ----- picks and pointer input -------------------------------------

    pub fn points(&self) -> &PickSet {
        &self.points
    }

    pub fn interaction(&self) -> &PickInteraction {
        &self.interaction
    }

    /// Label for the dragged or hovered point.
    pub fn tooltip(&self) -> Option<String> {
        self.interaction.tooltip()
    }

    /// Converter for the current view, limits and viewport.
    pub fn mapper(&self) -> CoordinateMapper<'_> {
        mapper_for(
            &self.view,
            self.dimensions,
            self.limits,
            self.config.plot.coordinate_decimals,
        )
    }

    pub fn pointer_down(&mut self, input: PointerInput) -> PointerOutcome {
        let mapper = mapper_for(
            &self.view,
            self.dimensions,
            self.limits,
            self.config.plot.coordinate_decimals,
        );
        self.interaction
            .pointer_down(&mut self.points, &mapper, input)
    }

    pub fn pointer_move(&mut self, input: PointerInput) -> PointerOutcome {
        let mapper = mapper_for(
            &self.view,
            self.dimensions,
            self.limits,
            self.config.plot.coordinate_decimals,
        );
        self.interaction
            .pointer_move(&mut self.points, &mapper, input)
    }

    pub fn pointer_up(&mut self) -> PointerOutcome {
        self.interaction.pointer_up()
    }

    /// Index of the point under `at`, if any.
    pub fn hit_test(&self, at: ScreenPoint) -> Option<usize> {
        hit_test(
            &self.points,
            &self.mapper(),
            at,
            self.interaction.hit_radius(),
        )
    }

    /// Screen positions of every point, in set order.
    pub fn point_positions(&self) -> Vec<ScreenPoint> {
        let mapper = self.mapper();
        self.points
            .iter()
            .map(|p| mapper.to_screen(p.frequency, p.slowness))
            .collect()
    }

    pub fn add_point(&mut self, point: PickPoint) {
        self.points.add(point);
    }

    /// Removes every point at the location of `point`.
    pub fn remove_point(&mut self, point: &PickPoint) -> usize {
        self.points.remove_matching(point)
    }

    /// Replaces the point set without notification.
    pub fn set_points(&mut self, points: Vec<PickPoint>) {
        self.points.replace(points);
        self.interaction.reset();
    }

    /// Clears every point.
    pub fn clear_points(&mut self) {
        if self.points.is_empty() {
            self.notifications
                .push_for(NotificationKind::Info, "No points to clear", SHORT_NOTICE);
            return;
        }
        self.points.clear();
        self.interaction.reset();
        self.notifications
            .push_for(NotificationKind::Success, "All points cleared", SHORT_NOTICE);
    }

    // ----- pick files --------------------------------------------------

    /// Uploads pick-file text.
    ///
    /// Into an empty set the points apply immediately. Otherwise they are
    /// held until [`resolve_upload`](Self::resolve_upload) is called.
    pub fn upload_picks(&mut self, content: &str, delimiter: Delimiter) -> UploadOutcome {
        match parse_picks(content, delimiter) {
            Ok(points) => self.stage_upload(points),
            Err(e) => self.reject_upload(&e),
        }
    }

    /// Uploads a pick file from disk.
    pub fn upload_pick_file(&mut self, path: impl AsRef<Path>) -> UploadOutcome {
        match read_pick_file(path) {
            Ok(points) => self.stage_upload(points),
            Err(e) => self.reject_upload(&e),
        }
    }

    fn reject_upload(&mut self, err: &IoError) -> UploadOutcome {
        match err {
            IoError::InvalidPickFile(_) => {
                self.notifications.warning("No valid points found in file");
            }
            _ => {
                debug!("upload failed: {err}");
                self.notifications
                    .error("Failed to upload file. Please try again.");
            }
        }
        UploadOutcome::Rejected
    }

    fn stage_upload(&mut self, points: Vec<PickPoint>) -> UploadOutcome {
        let n = points.len();
        if self.points.is_empty() {
            self.set_points(points);
            self.notifications
                .success(format!("Successfully loaded {n} points"));
            UploadOutcome::Applied(n)
        } else {
            debug!("holding {n} uploaded points for merge/replace");
            self.pending_upload = Some(points);
            UploadOutcome::Pending(n)
        }
    }

    /// Points waiting for an upload decision.
    pub fn pending_upload(&self) -> Option<&[PickPoint]> {
        self.pending_upload.as_deref()
    }

    /// Applies the user's choice for a held upload.
    ///
    /// Returns `false` when no upload is pending.
    pub fn resolve_upload(&mut self, decision: UploadDecision) -> bool {
        let Some(uploaded) = self.pending_upload.take() else {
            return false;
        };
        let n = uploaded.len();
        match decision {
            UploadDecision::Merge => {
                let existing = self.points.len();
                self.points.merge(uploaded);
                self.notifications
                    .success(format!("Added {n} points to existing {existing} points"));
            }
            UploadDecision::Replace => {
                self.set_points(uploaded);
                self.notifications
                    .success(format!("Replaced existing points with {n} new points"));
            }
            UploadDecision::Cancel => debug!("upload of {n} points cancelled"),
        }
        true
    }

    /// The point set in pick-file format, or `None` (with a warning) when
    /// there is nothing to export.
    pub fn export_picks(&mut self) -> Option<String> {
        if self.points.is_empty() {
            self.notifications.warning("No points to save");
            return None;
        }
        Some(format_picks(self.points.as_slice()))
    }

    /// Writes the point set to a pick file.
    pub fn download_picks(&mut self, path: impl AsRef<Path>) -> bool {
        if self.points.is_empty() {
            self.notifications.warning("No points to save");
            return false;
        }
        match write_pick_file(path, self.points.as_slice()) {
            Ok(()) => true,
            Err(e) => {
                debug!("download failed: {e}");
                self.notifications
                    .error("Failed to save file. Please try again.");
                false
            }
        }
    }

    // ----- view ----------------------------------------------------------

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Appends a grid transformation and re-renders.
    pub fn apply_transformation(&mut self, transformation: Transformation) {
        self.view.push(transformation);
        self.interaction.reset();
        debug!(
            "view now {:?}",
            self.view
                .transformations()
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
        );
        self.refresh_texture();
    }

    pub fn rotate_clockwise(&mut self) {
        self.apply_transformation(Transformation::RotateClockwise);
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.apply_transformation(Transformation::RotateCounterClockwise);
    }

    /// Mirrors the displayed image left to right.
    pub fn flip_horizontal(&mut self) {
        self.apply_transformation(self.view.screen_flip_horizontal());
    }

    /// Mirrors the displayed image top to bottom.
    pub fn flip_vertical(&mut self) {
        self.apply_transformation(self.view.screen_flip_vertical());
    }

    /// Returns to the canonical orientation.
    pub fn clear_transformations(&mut self) {
        if self.view.is_identity() {
            return;
        }
        self.view.clear();
        self.interaction.reset();
        self.refresh_texture();
    }

    pub fn x_axis_label(&self) -> &'static str {
        self.view.orientation().x_quantity().label()
    }

    pub fn y_axis_label(&self) -> &'static str {
        self.view.orientation().y_quantity().label()
    }

    /// Quantity drawn along screen X.
    pub fn x_quantity(&self) -> AxisQuantity {
        self.view.orientation().x_quantity()
    }

    pub fn limits(&self) -> DataLimits {
        self.limits
    }

    /// Applies a partial limits change.
    ///
    /// # Errors
    /// Returns the core error when the result would be degenerate; the
    /// limits stay unchanged.
    pub fn update_limits(&mut self, update: &DataLimitsUpdate) -> Result<()> {
        let limits = self.limits.merged(update);
        limits.validate()?;
        self.limits = limits;
        Ok(())
    }

    pub fn dimensions(&self) -> PlotDimensions {
        self.dimensions
    }

    /// Records a viewport resize; non-drawable sizes are ignored.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let dimensions = PlotDimensions::new(width, height);
        if !dimensions.is_drawable() {
            debug!("ignoring resize to {width}x{height}");
            return false;
        }
        self.dimensions = dimensions;
        true
    }

    // ----- project settings ----------------------------------------------

    pub fn options(&self) -> &ProjectOptions {
        &self.options
    }

    pub fn set_geometry(&mut self, geometry: Vec<GeometryItem>) {
        self.options.geometry = geometry;
    }

    /// Stores record options and applies their weight and enabled flag to
    /// loaded records with the same id.
    pub fn set_record_options(&mut self, records: Vec<RecordOption>) {
        if self.store_record_options(records) {
            self.refresh_texture();
        }
    }

    /// Stores record options without re-rendering. Returns whether any
    /// loaded record changed.
    fn store_record_options(&mut self, records: Vec<RecordOption>) -> bool {
        let mut touched = false;
        for option in &records {
            if let Some(record) = self.records.iter_mut().find(|r| r.name == option.id) {
                record.weight = option.weight;
                record.enabled = option.enabled;
                touched = true;
            }
        }
        self.options.records = records;
        touched
    }

    /// Stores axis settings and derives data limits from them.
    ///
    /// # Errors
    /// Returns the core error when the maxima give degenerate limits; the
    /// settings are stored but the limits stay unchanged.
    pub fn set_plot_limits(&mut self, plot_limits: PlotLimits) -> Result<()> {
        self.options.plot_limits = plot_limits;
        let update = DataLimitsUpdate {
            freq_min: Some(0.0),
            freq_max: Some(plot_limits.max_freq),
            slow_min: Some(0.0),
            slow_max: Some(plot_limits.max_slow),
        };
        self.update_limits(&update)
    }

    /// Axis samples returned with the last processed grids.
    pub fn frequency_samples(&self) -> Option<&[f64]> {
        self.frequency_samples.as_deref()
    }

    pub fn slowness_samples(&self) -> Option<&[f64]> {
        self.slowness_samples.as_deref()
    }

    // ----- records and texture -------------------------------------------

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Replaces the loaded records and re-renders.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.refresh_texture();
    }

    fn record_mut(&mut self, name: &str) -> Result<&mut Record> {
        self.records
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| Error::UnknownRecord(name.to_string()))
    }

    fn sync_record_option(&mut self, name: &str, weight: f64, enabled: bool) {
        if let Some(option) = self.options.records.iter_mut().find(|o| o.id == name) {
            option.weight = weight;
            option.enabled = enabled;
        }
    }

    /// Changes one record's weight and re-renders.
    ///
    /// # Errors
    /// Returns [`Error::UnknownRecord`] when no record has this name.
    pub fn set_record_weight(&mut self, name: &str, weight: f64) -> Result<()> {
        let record = self.record_mut(name)?;
        record.weight = weight;
        let enabled = record.enabled;
        self.sync_record_option(name, weight, enabled);
        self.refresh_texture();
        Ok(())
    }

    /// Enables or disables one record and re-renders.
    ///
    /// # Errors
    /// Returns [`Error::UnknownRecord`] when no record has this name.
    pub fn set_record_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        let record = self.record_mut(name)?;
        record.enabled = enabled;
        let weight = record.weight;
        self.sync_record_option(name, weight, enabled);
        self.refresh_texture();
        Ok(())
    }

    pub fn enabled_record_count(&self) -> usize {
        self.records.iter().filter(|r| r.enabled).count()
    }

    /// Turns processed backend grids into records.
    ///
    /// Grids arrive with slowness along rows; each is rotated clockwise and
    /// flipped vertically into plot orientation. Min/max come from the raw
    /// samples. Weight and enabled flag follow the matching record option.
    ///
    /// # Errors
    /// Returns an error for jagged grids; nothing is replaced then.
    pub fn ingest_grids(&mut self, processed: ProcessedGrids) -> Result<usize> {
        let mut records = Vec::with_capacity(processed.grids.len());
        for named in &processed.grids {
            let raw = named.to_grid()?;
            let (min, max) = raw.min_max().unwrap_or((0.0, 0.0));
            let mut record = Record::new(named.name.clone(), raw.rotate_clockwise().flip_vertical());
            record.min = min;
            record.max = max;
            if let Some(option) = self.options.records.iter().find(|o| o.id == named.name) {
                record.weight = option.weight;
                record.enabled = option.enabled;
            }
            records.push(record);
        }
        self.frequency_samples = processed.freq.map(|a| a.data);
        self.slowness_samples = processed.slow.map(|a| a.data);
        let n = records.len();
        self.set_records(records);
        Ok(n)
    }

    pub fn colormaps(&self) -> &ColorMaps {
        &self.colormaps
    }

    pub fn selected_colormap(&self) -> &str {
        &self.selected_colormap
    }

    /// Selects a registered colour map and re-renders.
    ///
    /// # Errors
    /// Returns the render error for unknown names.
    pub fn select_colormap(&mut self, name: &str) -> Result<()> {
        self.colormaps.get(name)?;
        self.selected_colormap = name.to_string();
        self.refresh_texture();
        Ok(())
    }

    /// Registers or overrides a colour map from stop strings.
    ///
    /// # Errors
    /// Returns the render error for malformed stops.
    pub fn update_colormap<S: AsRef<str>>(&mut self, name: &str, stops: &[S]) -> Result<()> {
        self.colormaps.insert_stops(name, stops)?;
        if name == self.selected_colormap {
            self.refresh_texture();
        }
        Ok(())
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Recomputes the texture from records, view and colour map.
    ///
    /// Without enabled records the texture is cleared. A failed composition
    /// leaves the previous texture in place and queues one notification.
    /// Returns whether the texture was replaced.
    pub fn refresh_texture(&mut self) -> bool {
        if self.enabled_record_count() == 0 {
            self.texture = None;
            return true;
        }
        let ramp = match self.colormaps.get(&self.selected_colormap) {
            Ok(ramp) => ramp,
            Err(e) => {
                warn!("{e}");
                return false;
            }
        };
        match render_composition(&self.records, &self.view, ramp) {
            Ok(texture) => {
                self.texture = Some(texture);
                true
            }
            Err(RenderError::ZeroWeightSum) => {
                self.notifications
                    .error("Total weight is 0, cannot create weighted texture");
                false
            }
            Err(e) => {
                debug!("texture failed: {e}");
                self.notifications.push_for(
                    NotificationKind::Error,
                    "Failed to create texture from data",
                    LONG_NOTICE,
                );
                false
            }
        }
    }

    // ----- notifications -------------------------------------------------

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Removes one notification.
    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    /// Takes all queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    // ----- backend -------------------------------------------------------

    /// Number of backend requests still running.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    fn dispatch(&mut self, request: BackendRequest) -> bool {
        let (Some(backend), Some(project_id)) = (&self.backend, &self.project_id) else {
            self.notifications.error("No project ID available");
            return false;
        };
        spawn_request(
            Arc::clone(backend),
            project_id.clone(),
            request,
            self.tx.clone(),
        );
        self.in_flight += 1;
        true
    }

    /// Fetches stored options (then reprocesses grids) and picks.
    pub fn load_settings(&mut self) -> bool {
        self.dispatch(BackendRequest::LoadOptions { reprocess: true })
            && self.dispatch(BackendRequest::LoadPicks)
    }

    /// Stores the point set and the current options.
    pub fn save_settings(&mut self) -> bool {
        self.dispatch(BackendRequest::SavePicks(self.points.to_vec()))
            && self.dispatch(BackendRequest::SaveOptions(self.options.clone()))
    }

    pub fn load_options(&mut self) -> bool {
        self.dispatch(BackendRequest::LoadOptions { reprocess: false })
    }

    pub fn load_picks(&mut self) -> bool {
        self.dispatch(BackendRequest::LoadPicks)
    }

    pub fn save_picks(&mut self) -> bool {
        self.dispatch(BackendRequest::SavePicks(self.points.to_vec()))
    }

    pub fn save_options(&mut self) -> bool {
        self.dispatch(BackendRequest::SaveOptions(self.options.clone()))
    }

    /// Requests grids for the current options.
    pub fn process_grids(&mut self) -> bool {
        let project_id = self.project_id.clone().unwrap_or_default();
        match ProcessGridsRequest::from_options(&project_id, &self.options) {
            Ok(request) => self.dispatch(BackendRequest::ProcessGrids(request)),
            Err(e) => {
                debug!("cannot build grid request: {e}");
                self.notifications
                    .push_for(NotificationKind::Error, MSG_PROCESSING_FAILED, LONG_NOTICE);
                false
            }
        }
    }

    /// Applies every completed backend response. Returns how many.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.handle_message(message);
            handled += 1;
        }
        handled
    }

    /// Blocks until no request is in flight or `timeout` passes.
    ///
    /// Responses are applied as they arrive. Returns `false` on timeout.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(message) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.handle_message(message);
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::OptionsLoaded { options, reprocess } => {
                let ProjectOptions {
                    geometry,
                    records,
                    plot_limits,
                } = options;
                self.set_geometry(geometry);
                let touched = self.store_record_options(records);
                if let Err(e) = self.set_plot_limits(plot_limits) {
                    warn!("stored plot limits rejected: {e}");
                }
                // A reprocess re-renders once the new grids arrive.
                let reprocessing = reprocess && self.process_grids();
                if touched && !reprocessing {
                    self.refresh_texture();
                }
            }
            SessionMessage::OptionsLoadFailed(e) => {
                debug!("{e}");
                self.notifications.error("Failed to load options data");
            }
            SessionMessage::PicksLoaded(points) => {
                debug!("loaded {} picks", points.len());
                self.set_points(points);
            }
            SessionMessage::PicksLoadFailed(e) => {
                debug!("{e}");
                self.notifications.error("Failed to load picks data");
            }
            SessionMessage::PicksSaved => {
                self.notifications.success("Points saved successfully");
            }
            SessionMessage::PicksSaveFailed(e) => {
                debug!("{e}");
                self.notifications.error("Failed to save points");
            }
            SessionMessage::OptionsSaved => {
                self.notifications.success("Options saved successfully");
            }
            SessionMessage::OptionsSaveFailed(e) => {
                debug!("{e}");
                self.notifications.error("Failed to save options");
            }
            SessionMessage::GridsProcessed(grids) => match self.ingest_grids(*grids) {
                Ok(n) => {
                    debug!("ingested {n} grids");
                    self.notifications.success("Record Data updated successfully");
                }
                Err(e) => {
                    debug!("{e}");
                    self.notifications
                        .push_for(NotificationKind::Error, MSG_PROCESSING_FAILED, LONG_NOTICE);
                }
            },
            SessionMessage::GridsFailed(e) => {
                debug!("{e}");
                self.notifications
                    .push_for(NotificationKind::Error, MSG_PROCESSING_FAILED, LONG_NOTICE);
            }
        }
    }
}
