//! Stop gesture: confirmed open palm closing into a held fist => Pause

use hand_geometry::{HandLandmarks, Point};
use motion_history::MotionHistory;
use tracing::{debug, info};

use super::{Detection, FollowUp, FrameContext, GestureDetector};
use crate::{GestureConfig, GestureEvent};

#[derive(Debug, Clone, Default)]
struct StopState {
    /// Palm center when the open palm was first seen
    reference: Option<Point>,
    /// Start of the current continuous fist
    fist_since_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct StopDetector {
    movement_threshold_px: i32,
    fist_confirm_ms: u64,
    state: StopState,
}

impl StopDetector {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            movement_threshold_px: config.movement_threshold_px,
            fist_confirm_ms: config.fist_confirm_ms,
            state: StopState::default(),
        }
    }
}

impl GestureDetector for StopDetector {
    fn name(&self) -> &'static str {
        "stop"
    }

    /// A palm that drifts while open does not count as held, so open-time
    /// accumulation restarts from the new position.
    fn prepare(&mut self, hand: Option<&HandLandmarks>, motion: &MotionHistory) -> Option<FollowUp> {
        let open = hand.is_some_and(HandLandmarks::is_open_palm);
        let Some(center) = motion.newest().filter(|_| open) else {
            self.state.reference = None;
            return None;
        };

        let Some(reference) = self.state.reference else {
            self.state.reference = Some(center);
            return None;
        };

        let threshold = self.movement_threshold_px.unsigned_abs();
        if center.x.abs_diff(reference.x) > threshold || center.y.abs_diff(reference.y) > threshold {
            debug!(
                "Open palm moved from {:?} to {:?}, restarting accumulation",
                reference, center
            );
            self.state.reference = Some(center);
            return Some(FollowUp::RestartAccumulation);
        }
        None
    }

    fn detect(&mut self, ctx: &FrameContext<'_>) -> Option<Detection> {
        if !(ctx.open_confirmed && ctx.is_fist()) {
            self.state.fist_since_ms = None;
            return None;
        }

        let since = *self.state.fist_since_ms.get_or_insert(ctx.now_ms);
        if ctx.now_ms.saturating_sub(since) < self.fist_confirm_ms {
            return None;
        }

        info!("Stop confirmed: fist held {}ms", ctx.now_ms.saturating_sub(since));
        self.reset();
        Some(Detection::with_follow_up(
            GestureEvent::Pause,
            FollowUp::ResetConfirmation,
        ))
    }

    fn reset(&mut self) {
        self.state = StopState::default();
    }
}
