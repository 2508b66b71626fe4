//! Messages from backend workers to the session.
//!
//! Each request runs on its own thread and sends exactly one message back
//! through the session's channel.

use seispick_core::PickPoint;
use seispick_io::{ProcessedGrids, ProjectOptions};

/// Completion of one backend request.
#[derive(Debug)]
pub enum SessionMessage {
    /// Stored options arrived. `reprocess` asks for a grid processing run.
    OptionsLoaded {
        options: ProjectOptions,
        reprocess: bool,
    },
    /// Loading options failed.
    OptionsLoadFailed(String),

    /// Stored picks arrived.
    PicksLoaded(Vec<PickPoint>),
    /// Loading picks failed.
    PicksLoadFailed(String),

    /// Picks were stored.
    PicksSaved,
    /// Storing picks failed.
    PicksSaveFailed(String),

    /// Options were stored.
    OptionsSaved,
    /// Storing options failed.
    OptionsSaveFailed(String),

    /// Grid processing finished.
    GridsProcessed(Box<ProcessedGrids>),
    /// Grid processing failed.
    GridsFailed(String),
}
