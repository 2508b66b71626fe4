//! seispick command-line interface.
//!
//! Offline rendering of record grids, pick-file conversion and inspection,
//! and fetching a project from the backend.
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    clippy::redundant_closure_for_method_calls,
    clippy::too_many_lines
)]

use clap::{Parser, Subcommand};
use log::{debug, info};
use seispick_core::Transformation;
use seispick_io::{
    parse_picks, read_pick_file, write_pick_file, Delimiter, HttpBackend, ProcessedGrids,
    RecordOption, DEFAULT_BASE_URL, DEFAULT_FILE_NAME,
};
use seispick_session::{Notification, NotificationKind, PlotSession, SessionConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: {0}")]
    SeispickIo(#[from] seispick_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] seispick_core::Error),

    #[error("Render error: {0}")]
    Render(#[from] seispick_render::Error),

    #[error("Session error: {0}")]
    Session(#[from] seispick_session::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Failed(String),
}

/// Dispersion-curve picking tools.
#[derive(Parser)]
#[command(name = "seispick")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose processed grids and write the texture as PNG
    Render {
        /// Processed grids (JSON, as returned by the backend)
        #[arg(long)]
        grids: PathBuf,

        /// Transformation to apply; repeat for a sequence
        #[arg(short, long = "transform")]
        transforms: Vec<Transformation>,

        /// Record weight as NAME=WEIGHT; repeat per record
        #[arg(short, long = "weight", value_parser = parse_weight)]
        weights: Vec<(String, f64)>,

        /// Colour map name (defaults to the configured one)
        #[arg(long)]
        colormap: Option<String>,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Pick-file utilities
    Picks {
        #[command(subcommand)]
        command: PicksCommand,
    },

    /// Load a project from the backend
    Fetch {
        /// Backend base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        url: String,

        /// Project id
        #[arg(long)]
        project: String,

        /// Bearer token
        #[arg(long)]
        token: Option<String>,

        /// Write the composed texture to this PNG
        #[arg(long)]
        png: Option<PathBuf>,

        /// Write the stored picks to this pick file
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_FILE_NAME)]
        picks: Option<PathBuf>,

        /// Seconds to wait for the backend
        #[arg(long, default_value = "120")]
        timeout: u64,
    },
}

#[derive(Subcommand)]
enum PicksCommand {
    /// Rewrite a pick file in canonical whitespace format
    Convert {
        /// Input pick file
        input: PathBuf,

        /// Output pick file
        output: PathBuf,

        /// Input fields are comma-separated
        #[arg(long)]
        comma: bool,
    },

    /// Summarise a pick file
    Info {
        /// Input pick file
        input: PathBuf,
    },
}

fn parse_weight(s: &str) -> std::result::Result<(String, f64), String> {
    let (name, weight) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=WEIGHT, got '{s}'"))?;
    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|e| format!("invalid weight '{weight}': {e}"))?;
    Ok((name.trim().to_string(), weight))
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let content = std::fs::read_to_string(path)?;
    let config: SessionConfig = serde_json::from_str(&content)?;
    config.validate()?;
    debug!("loaded configuration from {}", path.display());
    Ok(config)
}

fn report(notifications: &[Notification]) -> bool {
    let mut failed = false;
    for n in notifications {
        eprintln!("[{}] {}", n.kind, n.message);
        failed |= n.kind == NotificationKind::Error;
    }
    failed
}

fn save_texture(session: &PlotSession, path: &Path) -> Result<()> {
    let texture = session
        .texture()
        .ok_or_else(|| CliError::Failed("no enabled records to render".to_string()))?;
    texture.save_png(path)?;
    println!(
        "Wrote {}x{} texture to {} (range {:.4} .. {:.4})",
        texture.width(),
        texture.height(),
        path.display(),
        texture.min,
        texture.max
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            grids,
            transforms,
            weights,
            colormap,
            output,
        } => {
            let content = std::fs::read_to_string(&grids)?;
            let processed: ProcessedGrids = serde_json::from_str(&content)?;
            info!(
                "read {} grid(s) from {}",
                processed.grids.len(),
                grids.display()
            );

            let mut session = PlotSession::new(config)?;
            if let Some(name) = colormap {
                session.select_colormap(&name)?;
            }
            let options = processed
                .grids
                .iter()
                .map(|g| RecordOption {
                    id: g.name.clone(),
                    enabled: true,
                    weight: weights
                        .iter()
                        .find(|(name, _)| *name == g.name)
                        .map_or(1.0, |(_, w)| *w),
                    file_name: String::new(),
                })
                .collect();
            session.set_record_options(options);
            session.ingest_grids(processed)?;
            for t in transforms {
                session.apply_transformation(t);
            }

            if report(&session.take_notifications()) {
                return Err(CliError::Failed("rendering failed".to_string()));
            }
            save_texture(&session, &output)?;
            println!(
                "X axis: {}, Y axis: {}",
                session.x_axis_label(),
                session.y_axis_label()
            );
        }

        Commands::Picks { command } => match command {
            PicksCommand::Convert {
                input,
                output,
                comma,
            } => {
                let points = if comma {
                    parse_picks(&std::fs::read_to_string(&input)?, Delimiter::Comma)?
                } else {
                    read_pick_file(&input)?
                };
                write_pick_file(&output, &points)?;
                println!(
                    "Converted {} points: {} -> {}",
                    points.len(),
                    input.display(),
                    output.display()
                );
            }
            PicksCommand::Info { input } => {
                let points = read_pick_file(&input)?;
                println!("File: {}", input.display());
                println!("Points: {}", points.len());
                let range = |f: fn(&seispick_core::PickPoint) -> f64| {
                    points.iter().map(f).fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v), hi.max(v))
                    })
                };
                let (fmin, fmax) = range(|p| p.frequency);
                let (smin, smax) = range(|p| p.slowness);
                println!("Frequency range: {:.6} - {:.6}", fmin, fmax);
                println!("Slowness range: {:.6} - {:.6}", smin, smax);
            }
        },

        Commands::Fetch {
            url,
            project,
            token,
            png,
            picks,
            timeout,
        } => {
            let mut backend = HttpBackend::new(url)?;
            if let Some(token) = token {
                backend = backend.with_token(token);
            }
            let mut session = PlotSession::new(config)?.with_backend(Arc::new(backend), project);

            let start = Instant::now();
            session.load_settings();
            if !session.wait_idle(Duration::from_secs(timeout)) {
                report(&session.take_notifications());
                return Err(CliError::Failed(format!(
                    "backend did not answer within {timeout}s"
                )));
            }
            let failed = report(&session.take_notifications());
            info!("project loaded in {:.2}s", start.elapsed().as_secs_f64());

            let limits = session.limits();
            println!("Records: {}", session.records().len());
            for record in session.records() {
                let (rows, cols) = record.shape();
                println!(
                    "  {} {}x{} weight {} {}",
                    record.name,
                    rows,
                    cols,
                    record.weight,
                    if record.enabled { "enabled" } else { "disabled" }
                );
            }
            println!("Picks: {}", session.points().len());
            println!(
                "Limits: frequency {} - {}, slowness {} - {}",
                limits.freq_min, limits.freq_max, limits.slow_min, limits.slow_max
            );

            if let Some(path) = png {
                save_texture(&session, &path)?;
            }
            if let Some(path) = picks {
                if session.download_picks(&path) {
                    println!("Wrote {} picks to {}", session.points().len(), path.display());
                }
                report(&session.take_notifications());
            }
            if failed {
                return Err(CliError::Failed("one or more requests failed".to_string()));
            }
        }
    }

    Ok(())
}
