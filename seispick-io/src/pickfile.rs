//! Plain-text pick files.
//!
//! One point per line, seven numeric fields in the order
//! `d1 d2 frequency d3 slowness d4 d5`. Files are written with six decimal
//! places and single spaces. Lines with fewer than seven numeric fields are
//! skipped.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use seispick_core::PickPoint;

use crate::error::{Error, Result};

/// File name offered when downloading picks.
pub const DEFAULT_FILE_NAME: &str = "plotted_points.pck";

const FIELDS: usize = 7;

/// Field separator of a pick file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Runs of whitespace.
    Whitespace,
    /// Commas, with optional whitespace around each field.
    Comma,
    /// Comma when the line contains one, whitespace otherwise.
    #[default]
    Auto,
}

impl Delimiter {
    fn fields(self, line: &str) -> Vec<&str> {
        match self {
            Delimiter::Whitespace => line.split_whitespace().collect(),
            Delimiter::Comma => line.split(',').map(str::trim).collect(),
            Delimiter::Auto if line.contains(',') => Delimiter::Comma.fields(line),
            Delimiter::Auto => Delimiter::Whitespace.fields(line),
        }
    }
}

/// Parses one line into a point.
///
/// Returns `None` unless the first seven fields are finite numbers. Extra
/// fields are ignored.
pub fn parse_line(line: &str, delimiter: Delimiter) -> Option<PickPoint> {
    let fields = delimiter.fields(line);
    if fields.len() < FIELDS {
        return None;
    }
    let mut values = [0.0f64; FIELDS];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = field.parse::<f64>().ok().filter(|v| v.is_finite())?;
    }
    Some(PickPoint::from_fields(values))
}

/// Parses a whole file body.
///
/// # Errors
/// Returns [`Error::InvalidPickFile`] when no line yields a point.
pub fn parse_picks(content: &str, delimiter: Delimiter) -> Result<Vec<PickPoint>> {
    parse_labelled(content, delimiter, "input")
}

fn parse_labelled(content: &str, delimiter: Delimiter, source: &str) -> Result<Vec<PickPoint>> {
    let mut points = Vec::new();
    for (n, line) in content.trim().lines().enumerate() {
        match parse_line(line, delimiter) {
            Some(point) => points.push(point),
            None => debug!("{source}: skipping line {}", n + 1),
        }
    }
    if points.is_empty() {
        return Err(Error::InvalidPickFile(source.to_string()));
    }
    Ok(points)
}

/// One formatted line, without a line break.
pub fn format_line(point: &PickPoint) -> String {
    point
        .fields()
        .iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The full file body: formatted lines joined by `\n`.
pub fn format_picks(points: &[PickPoint]) -> String {
    points.iter().map(format_line).collect::<Vec<_>>().join("\n")
}

/// Writes points in pick-file format.
///
/// # Errors
/// Propagates write failures.
pub fn write_picks<W: Write>(writer: &mut W, points: &[PickPoint]) -> Result<()> {
    writer.write_all(format_picks(points).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Reads a pick file, detecting the delimiter per line.
///
/// # Errors
/// I/O failures, or [`Error::InvalidPickFile`] when nothing parses.
pub fn read_pick_file<P: AsRef<Path>>(path: P) -> Result<Vec<PickPoint>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let points = parse_labelled(&content, Delimiter::Auto, &path.display().to_string())?;
    info!("read {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Writes a pick file, replacing any existing one.
///
/// # Errors
/// Propagates I/O failures.
pub fn write_pick_file<P: AsRef<Path>>(path: P, points: &[PickPoint]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_picks(&mut writer, points)?;
    info!("wrote {} points to {}", points.len(), path.display());
    Ok(())
}
