//! Gesture Replay
//!
//! Feeds recorded hand-landmark streams (JSON lines) through the gesture
//! tracker and a media controller. Events go to stdout as JSON lines,
//! logs go to stderr.

mod player;
mod replay;

pub use player::LoggingPlayer;
pub use replay::{run_replay, Classifier, EventRecord, FrameRecord, ReplayStats};

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use gesture_core::GestureConfig;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Tuning preset used when no config file is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Default,
    Strict,
    Lenient,
}

/// Classification mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Stateful detectors gated by open-palm confirmation
    Temporal,
    /// Stateless single-frame pose classification
    Static,
}

#[derive(Parser, Debug)]
#[command(name = "gesture-replay", version, about = "Replay recorded hand landmarks through the gesture pipeline")]
pub struct Cli {
    /// Landmark stream, one JSON frame per line. Reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// TOML gesture configuration (GESTURE_* env vars override it)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Preset::Default)]
    pub preset: Preset,

    #[arg(long, value_enum, default_value_t = Mode::Temporal)]
    pub mode: Mode,

    /// Emit every frame, not only detections
    #[arg(long)]
    pub all: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Resolve the gesture configuration. A config file takes precedence
    /// over the preset.
    pub fn gesture_config(&self) -> anyhow::Result<GestureConfig> {
        match (&self.config, self.preset) {
            (Some(path), preset) => {
                if preset != Preset::Default {
                    warn!("--preset {:?} ignored, using {}", preset, path.display());
                }
                GestureConfig::load(Some(path))
                    .with_context(|| format!("Failed to load config from {}", path.display()))
            }
            (None, Preset::Default) => {
                GestureConfig::load(None).context("Failed to load config from environment")
            }
            (None, Preset::Strict) => Ok(GestureConfig::strict()),
            (None, Preset::Lenient) => Ok(GestureConfig::lenient()),
        }
    }
}

/// Initialize logging to stderr. Level from `RUST_LOG`, default `info`.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {e}"))
}
