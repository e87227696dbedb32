//! Replay loop

use anyhow::Context;
use gesture_core::{classify_static, GestureError, GestureEvent, HandTracker};
use hand_geometry::{HandLandmarks, Point};
use media_control::{GestureController, MediaPlayer};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// One recorded frame: `{"t_ms": 1033, "hands": [[[x, y], ...21], ...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub t_ms: u64,
    #[serde(default)]
    pub hands: Vec<Vec<Point>>,
}

/// One output line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub t_ms: u64,
    pub event: GestureEvent,
}

pub enum Classifier {
    Temporal(Box<HandTracker>),
    Static,
}

impl Classifier {
    pub fn classify(&mut self, frame: &FrameRecord) -> Result<GestureEvent, GestureError> {
        match self {
            Classifier::Temporal(tracker) => tracker.process_at(&frame.hands, frame.t_ms),
            Classifier::Static => {
                let hand = frame
                    .hands
                    .first()
                    .and_then(|points| match HandLandmarks::from_points(points) {
                        Ok(hand) => Some(hand),
                        Err(e) => {
                            warn!("Rejected hand at {}ms: {}", frame.t_ms, e);
                            None
                        }
                    });
                Ok(classify_static(hand.as_ref()))
            }
        }
    }
}

/// Replay summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub frames: usize,
    pub detections: usize,
    pub rejected_lines: usize,
    pub commands: usize,
}

/// Replay every frame from `reader`, writing event lines to `writer` and
/// driving `controller`. Malformed lines are logged and skipped.
pub async fn run_replay<R, W, P>(
    reader: R,
    writer: &mut W,
    classifier: &mut Classifier,
    controller: &mut GestureController<P>,
    emit_all: bool,
) -> anyhow::Result<ReplayStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    P: MediaPlayer,
{
    let mut stats = ReplayStats::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let frame: FrameRecord = match serde_json::from_str(line) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Skipping line {}: {}", line_no, e);
                stats.rejected_lines += 1;
                continue;
            }
        };
        stats.frames += 1;

        let event = classifier.classify(&frame)?;
        if event.is_detection() {
            stats.detections += 1;
            match controller.handle(event, frame.t_ms) {
                Ok(Some(command)) => {
                    debug!("Frame {}ms -> {:?}", frame.t_ms, command);
                    stats.commands += 1;
                }
                Ok(None) => {}
                Err(e) => warn!("Player failed on {}: {}", event, e),
            }
        }

        if emit_all || event.is_detection() {
            let record = EventRecord {
                t_ms: frame.t_ms,
                event,
            };
            let mut out = serde_json::to_string(&record)?;
            out.push('\n');
            writer.write_all(out.as_bytes()).await.context("Failed to write event")?;
        }
    }

    writer.flush().await?;
    info!(
        "Replay finished: {} frames, {} detections, {} commands, {} rejected lines",
        stats.frames, stats.detections, stats.commands, stats.rejected_lines
    );
    Ok(stats)
}
