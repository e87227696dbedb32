//! Gesture Replay - Main Entry Point

use anyhow::Context;
use clap::Parser;
use gesture_core::HandTracker;
use gesture_replay::{init_logging, run_replay, Classifier, Cli, LoggingPlayer, Mode};
use media_control::{ControllerConfig, GestureController};
use tokio::io::{AsyncBufRead, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs)?;

    info!("=== Gesture Replay v{} ===", env!("CARGO_PKG_VERSION"));

    let config = cli.gesture_config()?;
    let mut classifier = match cli.mode {
        Mode::Temporal => Classifier::Temporal(Box::new(HandTracker::new(config)?)),
        Mode::Static => Classifier::Static,
    };
    let mut controller = GestureController::new(ControllerConfig::default(), LoggingPlayer::new());

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match &cli.input {
        Some(path) => {
            info!("Replaying {}", path.display());
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => {
            info!("Replaying from stdin");
            Box::new(BufReader::new(tokio::io::stdin()))
        }
    };

    let mut stdout = tokio::io::stdout();
    let stats = run_replay(reader, &mut stdout, &mut classifier, &mut controller, cli.all).await?;

    let player = controller.player();
    info!(
        "Player state: playing={}, track={}, volume={:.2}, suppressed={}",
        player.is_playing(),
        player.track(),
        player.volume(),
        controller.suppressed()
    );
    info!("Processed {} frames", stats.frames);

    Ok(())
}
