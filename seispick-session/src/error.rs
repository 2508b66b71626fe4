//! Error types for seispick-session.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by session operations that return them directly.
///
/// Backend failures never appear here; they become notifications.
#[derive(Error, Debug)]
pub enum Error {
    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] seispick_core::Error),

    /// Composition or colour map error.
    #[error("render error: {0}")]
    Render(#[from] seispick_render::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] seispick_io::Error),

    /// No record with this name is loaded.
    #[error("unknown record: {0}")]
    UnknownRecord(String),
}
