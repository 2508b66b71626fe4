#![allow(clippy::uninlined_format_args, clippy::float_cmp)]
use std::sync::{Arc, Mutex};
use std::time::Duration;

use approx::assert_abs_diff_eq;
use seispick_core::{Grid, PickPoint, ScreenPoint};
use seispick_io::{
    Delimiter, Error as IoError, NamedGrid, PlotLimits, ProcessGridsRequest, ProcessedGrids,
    ProjectBackend, ProjectOptions, RecordOption,
};
use seispick_render::Record;
use seispick_session::{
    NotificationKind, PlotSession, PointerInput, PointerOutcome, SessionConfig, UploadDecision,
    UploadOutcome,
};

#[derive(Default)]
struct MockState {
    options: ProjectOptions,
    picks: Vec<PickPoint>,
    fail_saves: bool,
    requests: Vec<ProcessGridsRequest>,
}

#[derive(Default)]
struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    fn with_options(options: ProjectOptions) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().options = options;
        backend
    }

    fn failing_saves() -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().fail_saves = true;
        backend
    }
}

impl ProjectBackend for MockBackend {
    fn get_options(&self, _project_id: &str) -> seispick_io::Result<ProjectOptions> {
        Ok(self.state.lock().unwrap().options.clone())
    }

    fn save_options(&self, _project_id: &str, options: &ProjectOptions) -> seispick_io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_saves {
            return Err(IoError::Network("503 Service Unavailable".to_string()));
        }
        state.options = options.clone();
        Ok(())
    }

    fn get_picks(&self, _project_id: &str) -> seispick_io::Result<Vec<PickPoint>> {
        Ok(self.state.lock().unwrap().picks.clone())
    }

    fn save_picks(&self, _project_id: &str, points: &[PickPoint]) -> seispick_io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_saves {
            return Err(IoError::Network("503 Service Unavailable".to_string()));
        }
        state.picks = points.to_vec();
        Ok(())
    }

    fn process_grids(&self, request: &ProcessGridsRequest) -> seispick_io::Result<ProcessedGrids> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        let grids = state
            .options
            .records
            .iter()
            .map(|r| NamedGrid {
                name: r.id.clone(),
                data: vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
                shape: vec![2, 3],
            })
            .collect();
        Ok(ProcessedGrids {
            grids,
            freq: None,
            slow: None,
        })
    }
}

fn record_option(id: &str, weight: f64) -> RecordOption {
    RecordOption {
        id: id.to_string(),
        enabled: true,
        weight,
        file_name: format!("{id}.sgy"),
    }
}

fn offline() -> PlotSession {
    PlotSession::new(SessionConfig::default()).unwrap()
}

fn two_records() -> Vec<Record> {
    vec![
        Record::new("A", Grid::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap()),
        Record::new("B", Grid::from_rows(vec![vec![3.0, 2.0], vec![1.0, 0.0]]).unwrap()),
    ]
}

#[test]
fn test_zero_weight_sum_notifies_once() {
    let mut session = offline();
    session.set_records(two_records());
    let before = session.texture().cloned().unwrap();
    session.take_notifications();

    session.set_record_weight("A", 0.0).unwrap();
    assert!(session.notifications().is_empty());
    session.set_record_weight("B", 0.0).unwrap();

    let errors: Vec<_> = session
        .notifications()
        .iter()
        .filter(|n| n.kind == NotificationKind::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "Total weight is 0, cannot create weighted texture"
    );
    assert_eq!(session.texture(), Some(&before));
}

#[test]
fn test_unknown_record_rejected() {
    let mut session = offline();
    session.set_records(two_records());
    assert!(session.set_record_enabled("C", false).is_err());
}

#[test]
fn test_disabling_all_records_clears_texture() {
    let mut session = offline();
    session.set_records(two_records());
    session.set_record_enabled("A", false).unwrap();
    assert!(session.texture().is_some());
    session.set_record_enabled("B", false).unwrap();
    assert!(session.texture().is_none());
}

#[test]
fn test_add_then_remove_restores_points() {
    let mut session = offline();
    session.add_point(PickPoint::new(10.0, 0.002));
    let before = session.points().clone();

    let added = session.pointer_down(PointerInput::at(320.0, 240.0).with_add());
    let PointerOutcome::Added(point) = added else {
        panic!("expected an added point, got {:?}", added);
    };
    assert_abs_diff_eq!(point.frequency, 25.0);
    assert_abs_diff_eq!(point.slowness, 0.0075);

    let removed = session.pointer_down(PointerInput::at(320.0, 240.0).with_remove());
    assert!(matches!(removed, PointerOutcome::Removed { count: 1, .. }));
    assert_eq!(session.points(), &before);
}

#[test]
fn test_hit_radius_boundary() {
    let mut session = offline();
    session.add_point(PickPoint::new(25.0, 0.0075));
    let at = session.point_positions()[0];
    assert_abs_diff_eq!(at.x, 320.0);
    assert_abs_diff_eq!(at.y, 240.0);

    assert_eq!(session.hit_test(at), Some(0));
    assert_eq!(session.hit_test(ScreenPoint::new(at.x + 9.0, at.y)), Some(0));
    assert_eq!(session.hit_test(ScreenPoint::new(at.x + 11.0, at.y)), None);
    assert_eq!(session.hit_test(ScreenPoint::new(at.x, at.y - 11.0)), None);
}

#[test]
fn test_drag_moves_point_and_updates_tooltip() {
    let mut session = offline();
    session.add_point(PickPoint::new(25.0, 0.0075));
    assert!(matches!(
        session.pointer_down(PointerInput::at(322.0, 241.0)),
        PointerOutcome::DragStarted(_)
    ));
    let moved = session.pointer_move(PointerInput::at(0.0, 0.0));
    assert!(moved.changed_points());
    let p = session.points().get(0).copied().unwrap();
    assert_abs_diff_eq!(p.frequency, 50.0);
    assert_abs_diff_eq!(p.slowness, 0.015);
    assert_eq!(
        session.tooltip().as_deref(),
        Some("(Slow:0.015000, Freq:50.000000)")
    );
    assert_eq!(session.pointer_up(), PointerOutcome::DragEnded);
}

#[test]
fn test_rotation_swaps_axis_labels() {
    let mut session = offline();
    assert_eq!(session.x_axis_label(), "Slowness");
    session.rotate_clockwise();
    assert_eq!(session.x_axis_label(), "Frequency");
    assert_eq!(session.y_axis_label(), "Slowness");
    session.rotate_counter_clockwise();
    assert!(session.view().is_identity());
}

#[test]
fn test_rotation_reorients_texture() {
    let mut session = offline();
    session.set_records(vec![Record::new(
        "A",
        Grid::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap(),
    )]);
    let texture = session.texture().unwrap();
    assert_eq!((texture.width(), texture.height()), (3, 2));
    session.rotate_clockwise();
    let texture = session.texture().unwrap();
    assert_eq!((texture.width(), texture.height()), (2, 3));
    session.clear_transformations();
    assert_eq!(session.texture().unwrap().width(), 3);
}

#[test]
fn test_upload_into_empty_set_applies() {
    let mut session = offline();
    let outcome = session.upload_picks(
        "0 0 10.0 0 0.005 0 0\n0 0 20.0 0 0.004 0 0\n",
        Delimiter::Auto,
    );
    assert_eq!(outcome, UploadOutcome::Applied(2));
    assert_eq!(session.points().len(), 2);
    assert_eq!(
        session.notifications().last().unwrap().message,
        "Successfully loaded 2 points"
    );
}

#[test]
fn test_upload_gate_merge_replace_cancel() {
    let content = "0 0 10.0 0 0.005 0 0\n0 0 20.0 0 0.004 0 0\n";

    let mut session = offline();
    session.add_point(PickPoint::new(30.0, 0.001));
    assert_eq!(
        session.upload_picks(content, Delimiter::Whitespace),
        UploadOutcome::Pending(2)
    );
    assert_eq!(session.points().len(), 1);
    assert!(session.resolve_upload(UploadDecision::Merge));
    assert_eq!(session.points().len(), 3);
    assert_abs_diff_eq!(session.points().get(0).unwrap().frequency, 30.0);
    assert_eq!(
        session.notifications().last().unwrap().message,
        "Added 2 points to existing 1 points"
    );
    assert!(!session.resolve_upload(UploadDecision::Merge));

    session.upload_picks(content, Delimiter::Whitespace);
    assert!(session.resolve_upload(UploadDecision::Replace));
    assert_eq!(session.points().len(), 2);
    assert_eq!(
        session.notifications().last().unwrap().message,
        "Replaced existing points with 2 new points"
    );

    let notices = session.notifications().len();
    session.upload_picks(content, Delimiter::Whitespace);
    assert!(session.resolve_upload(UploadDecision::Cancel));
    assert_eq!(session.points().len(), 2);
    assert!(session.pending_upload().is_none());
    assert_eq!(session.notifications().len(), notices);
}

#[test]
fn test_upload_without_valid_lines() {
    let mut session = offline();
    session.add_point(PickPoint::new(30.0, 0.001));
    assert_eq!(
        session.upload_picks("header\n1 2 3\n", Delimiter::Auto),
        UploadOutcome::Rejected
    );
    let last = session.notifications().last().unwrap();
    assert_eq!(last.kind, NotificationKind::Warning);
    assert_eq!(last.message, "No valid points found in file");
    assert_eq!(session.points().len(), 1);
}

#[test]
fn test_export_and_download() {
    let mut session = offline();
    assert!(session.export_picks().is_none());
    assert_eq!(
        session.notifications().last().unwrap().message,
        "No points to save"
    );

    session.add_point(PickPoint::new(12.5, 0.0042));
    assert_eq!(
        session.export_picks().unwrap(),
        "0.000000 0.000000 12.500000 0.000000 0.004200 0.000000 0.000000"
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plotted_points.pck");
    assert!(session.download_picks(&path));
    let back = seispick_io::read_pick_file(&path).unwrap();
    assert_eq!(back, session.points().to_vec());

    assert!(!session.download_picks(dir.path().join("missing").join("x.pck")));
    assert_eq!(
        session.notifications().last().unwrap().message,
        "Failed to save file. Please try again."
    );
}

#[test]
fn test_load_settings_ingests_grids() {
    let options = ProjectOptions {
        geometry: Vec::new(),
        records: vec![record_option("r1", 2.0), record_option("r2", 0.5)],
        plot_limits: PlotLimits {
            num_freq: 60,
            max_freq: 80.0,
            num_slow: 40,
            max_slow: 0.02,
        },
    };
    let backend = Arc::new(MockBackend::with_options(options));
    backend.state.lock().unwrap().picks = vec![PickPoint::new(40.0, 0.01)];

    let mut session = offline().with_backend(backend.clone(), "p1");
    assert!(session.load_settings());
    assert!(session.is_busy());
    assert!(session.wait_idle(Duration::from_secs(5)));

    assert_abs_diff_eq!(session.limits().freq_max, 80.0);
    assert_abs_diff_eq!(session.limits().slow_max, 0.02);
    assert_eq!(session.points().len(), 1);
    assert_eq!(session.records().len(), 2);
    assert_abs_diff_eq!(session.records()[0].weight, 2.0);
    assert_eq!(session.records()[0].shape(), (3, 2));
    assert!(session.texture().is_some());
    assert!(session
        .notifications()
        .iter()
        .any(|n| n.message == "Record Data updated successfully"));

    let requests = &backend.state.lock().unwrap().requests;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].project_id, "p1");
    assert_eq!(requests[0].num_freq_points, 60);
}

#[test]
fn test_save_settings_round_trip() {
    let backend = Arc::new(MockBackend::default());
    let mut session = offline().with_backend(backend.clone(), "p1");
    session.add_point(PickPoint::new(15.0, 0.003));
    assert!(session.save_settings());
    assert!(session.wait_idle(Duration::from_secs(5)));

    let messages: Vec<_> = session
        .take_notifications()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert!(messages.contains(&"Points saved successfully".to_string()));
    assert!(messages.contains(&"Options saved successfully".to_string()));
    assert_eq!(backend.state.lock().unwrap().picks.len(), 1);
}

#[test]
fn test_save_failure_notifies() {
    let backend = Arc::new(MockBackend::failing_saves());
    let mut session = offline().with_backend(backend, "p1");
    assert!(session.save_picks());
    assert!(session.wait_idle(Duration::from_secs(5)));
    let last = session.notifications().last().unwrap();
    assert_eq!(last.kind, NotificationKind::Error);
    assert_eq!(last.message, "Failed to save points");
}

#[test]
fn test_clear_notifications() {
    let mut session = offline();
    session.clear_points();
    let notice = session.notifications().last().unwrap().clone();
    assert_eq!(notice.kind, NotificationKind::Info);
    assert_eq!(notice.duration, Duration::from_millis(3000));

    session.add_point(PickPoint::new(15.0, 0.003));
    session.clear_points();
    let notice = session.notifications().last().unwrap();
    assert_eq!(notice.kind, NotificationKind::Success);
    assert_eq!(notice.message, "All points cleared");

    let id = notice.id;
    assert!(session.dismiss_notification(id));
    assert_eq!(session.notifications().len(), 1);
}

#[test]
fn test_zero_weight_reload_notifies_once() {
    let options = ProjectOptions {
        records: vec![record_option("A", 0.0), record_option("B", 0.0)],
        ..ProjectOptions::default()
    };
    let backend = Arc::new(MockBackend::with_options(options));
    let mut session = offline().with_backend(backend, "p1");
    session.set_records(two_records());
    assert!(session.texture().is_some());

    assert!(session.load_settings());
    assert!(session.wait_idle(Duration::from_secs(5)));

    let errors = session
        .notifications()
        .iter()
        .filter(|n| n.kind == NotificationKind::Error)
        .count();
    assert_eq!(errors, 1);
    assert!(session.records().iter().all(|r| r.weight == 0.0));
}
