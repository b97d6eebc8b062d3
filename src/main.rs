//! versecast - Entry Point

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use versecast::config::ResolvedConfig;
use versecast::lookup::{MemoryLookup, VerseLookup};
use versecast::model::AppError;
use versecast::state::{MirrorSurface, SurfaceState};
use versecast::view_state::{MonospaceMeasure, ViewportDimensions};

/// versecast - lay out verse passages and replay operator/mirror sessions
#[derive(Parser, Debug)]
#[command(name = "versecast")]
#[command(version)]
#[command(about = "Dual-surface verse presentation engine")]
pub struct Args {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verse library (JSON)
    #[arg(long, global = true)]
    pub library: Option<PathBuf>,

    /// Font size as a percentage of canvas height
    #[arg(long, global = true)]
    pub font_size: Option<f64>,

    /// Log to stderr instead of the log file
    #[arg(long, global = true)]
    pub log_stderr: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Look up a reference and print the rendered frame
    Preview {
        /// Reference such as "JHN 3:16-18"
        reference: String,

        /// Canvas width in pixels
        #[arg(long, default_value_t = 1920.0)]
        width: f64,

        /// Canvas height in pixels
        #[arg(long, default_value_t = 1080.0)]
        height: f64,

        /// Highlight this verse (0-based index within the passage)
        #[arg(long)]
        highlight: Option<usize>,
    },

    /// Drive a mirror from a recorded message stream and print its state as JSON
    Replay {
        /// JSON-lines message stream
        stream: PathBuf,

        /// Canvas width in pixels
        #[arg(long, default_value_t = 1920.0)]
        width: f64,

        /// Canvas height in pixels
        #[arg(long, default_value_t = 1080.0)]
        height: f64,

        /// Stop at this time in milliseconds (whole stream if omitted)
        #[arg(long)]
        at: Option<f64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    // The log path only comes from the file, so logging starts before the
    // env and CLI layers and their rejections are recorded.
    let merged = {
        let config_file = versecast::config::load_config_with_precedence(args.config.clone())?;
        versecast::config::merge_config(config_file)?
    };

    let log_output = if args.log_stderr {
        versecast::logging::LogOutput::Stderr
    } else {
        versecast::logging::LogOutput::File(merged.log_file_path.clone())
    };
    versecast::logging::init(&log_output)?;

    let config = versecast::config::apply_cli_overrides(
        versecast::config::apply_env_overrides(merged),
        args.library.clone(),
        args.font_size,
    );

    info!(config = ?config, "Configuration loaded and resolved");

    let output = match args.command {
        Command::Preview {
            reference,
            width,
            height,
            highlight,
        } => preview(&config, &reference, ViewportDimensions::new(width, height), highlight)?,
        Command::Replay {
            stream,
            width,
            height,
            at,
        } => replay(&config, &stream, ViewportDimensions::new(width, height), at)?,
    };
    print!("{output}");

    Ok(())
}

fn preview(
    config: &ResolvedConfig,
    reference: &str,
    viewport: ViewportDimensions,
    highlight: Option<usize>,
) -> Result<String, AppError> {
    let library = config.library_path.as_deref().ok_or(AppError::MissingLibrary)?;
    let lookup = MemoryLookup::load(library)?;
    let content = lookup.lookup(reference)?;

    let mut surface = SurfaceState::new(
        config.style.clone(),
        viewport,
        Arc::new(MonospaceMeasure::default()),
    );
    surface.replace_content(content);
    match highlight {
        Some(index) if index < surface.verse_count() => {
            surface.set_highlight(Some(index));
        }
        Some(index) => warn!(
            index,
            verses = surface.verse_count(),
            "ignoring out-of-range --highlight"
        ),
        None => {}
    }
    if let Some(index) = surface.active_index() {
        surface.set_scroll_offset(surface.scroll_target_for(index));
    }

    let frame = versecast::view::render(&surface, 0.0);
    Ok(versecast::view::frame_to_text(&frame))
}

fn replay(
    config: &ResolvedConfig,
    stream: &Path,
    viewport: ViewportDimensions,
    at: Option<f64>,
) -> Result<String, AppError> {
    let reader = BufReader::new(File::open(stream)?);
    let messages = versecast::sync::decode_stream(reader)?;

    let mut mirror = MirrorSurface::new(
        config.style.clone(),
        viewport,
        Arc::new(MonospaceMeasure::default()),
    );
    versecast::integration::replay(&mut mirror, &messages, at);

    let mut json = serde_json::to_string_pretty(&mirror.snapshot())?;
    json.push('\n');
    Ok(json)
}
