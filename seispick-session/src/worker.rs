//! Backend request workers.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use log::debug;
use seispick_core::PickPoint;
use seispick_io::{ProcessGridsRequest, ProjectBackend, ProjectOptions};

use crate::message::SessionMessage;

/// One backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendRequest {
    LoadOptions { reprocess: bool },
    LoadPicks,
    SavePicks(Vec<PickPoint>),
    SaveOptions(ProjectOptions),
    ProcessGrids(ProcessGridsRequest),
}

impl BackendRequest {
    fn name(&self) -> &'static str {
        match self {
            BackendRequest::LoadOptions { .. } => "load options",
            BackendRequest::LoadPicks => "load picks",
            BackendRequest::SavePicks(_) => "save picks",
            BackendRequest::SaveOptions(_) => "save options",
            BackendRequest::ProcessGrids(_) => "process grids",
        }
    }
}

/// Runs one request to completion and reports the result on `tx`.
pub fn run_request(
    backend: &dyn ProjectBackend,
    project_id: &str,
    request: BackendRequest,
    tx: &Sender<SessionMessage>,
) {
    debug!("{} for project {project_id}", request.name());
    let message = match request {
        BackendRequest::LoadOptions { reprocess } => match backend.get_options(project_id) {
            Ok(options) => SessionMessage::OptionsLoaded { options, reprocess },
            Err(e) => SessionMessage::OptionsLoadFailed(e.to_string()),
        },
        BackendRequest::LoadPicks => match backend.get_picks(project_id) {
            Ok(points) => SessionMessage::PicksLoaded(points),
            Err(e) => SessionMessage::PicksLoadFailed(e.to_string()),
        },
        BackendRequest::SavePicks(points) => match backend.save_picks(project_id, &points) {
            Ok(()) => SessionMessage::PicksSaved,
            Err(e) => SessionMessage::PicksSaveFailed(e.to_string()),
        },
        BackendRequest::SaveOptions(options) => match backend.save_options(project_id, &options) {
            Ok(()) => SessionMessage::OptionsSaved,
            Err(e) => SessionMessage::OptionsSaveFailed(e.to_string()),
        },
        BackendRequest::ProcessGrids(request) => match backend.process_grids(&request) {
            Ok(grids) => SessionMessage::GridsProcessed(Box::new(grids)),
            Err(e) => SessionMessage::GridsFailed(e.to_string()),
        },
    };
    // The session may have been dropped; nothing left to report to.
    let _ = tx.send(message);
}

/// Runs `request` on a new thread.
pub fn spawn_request(
    backend: Arc<dyn ProjectBackend>,
    project_id: String,
    request: BackendRequest,
    tx: Sender<SessionMessage>,
) {
    thread::spawn(move || run_request(backend.as_ref(), &project_id, request, &tx));
}
