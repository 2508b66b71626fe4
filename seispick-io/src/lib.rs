//! seispick-io: Pick files and the project backend for seispick.
//!
//! This crate reads and writes the plain-text pick format, defines the
//! [`ProjectBackend`] contract with its JSON wire types, and provides a
//! blocking HTTP implementation of it.
//!

pub mod backend;
mod error;
pub mod http;
pub mod pickfile;

pub use backend::{
    AxisSamples, GeometryItem, NamedGrid, PlotLimits, ProcessGridsRequest, ProcessedGrids,
    ProjectBackend, ProjectOptions, RecordOption,
};
pub use error::{Error, Result};
pub use http::{HttpBackend, DEFAULT_BASE_URL};
pub use pickfile::{
    format_picks, parse_picks, read_pick_file, write_pick_file, write_picks, Delimiter,
    DEFAULT_FILE_NAME,
};
