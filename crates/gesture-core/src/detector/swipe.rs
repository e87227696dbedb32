//! Horizontal swipe of a confirmed open palm => Next / Previous

use tracing::info;

use super::{Detection, FollowUp, FrameContext, GestureDetector};
use crate::{GestureConfig, GestureEvent};

/// Minimum trail length before a swipe is measured
const MIN_TRAIL: usize = 3;

#[derive(Debug, Clone)]
pub struct SwipeDetector {
    x_threshold_px: i32,
    y_tolerance_px: i32,
}

impl SwipeDetector {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            x_threshold_px: config.swipe_x_threshold_px,
            y_tolerance_px: config.swipe_y_tolerance_px,
        }
    }
}

impl GestureDetector for SwipeDetector {
    fn name(&self) -> &'static str {
        "swipe"
    }

    fn detect(&mut self, ctx: &FrameContext<'_>) -> Option<Detection> {
        if !ctx.open_confirmed || ctx.motion.len() < MIN_TRAIL || !ctx.is_open_palm() {
            return None;
        }

        let (dx, dy) = ctx.motion.displacement()?;
        if dx.saturating_abs() <= self.x_threshold_px || dy.saturating_abs() > self.y_tolerance_px {
            return None;
        }

        let event = if dx > 0 {
            GestureEvent::Next
        } else {
            GestureEvent::Previous
        };
        info!("Swipe {} (dx={}, dy={})", event, dx, dy);
        // Clearing the trail keeps the same sweep from firing again
        Some(Detection::with_follow_up(event, FollowUp::ClearMotionHistory))
    }

    fn reset(&mut self) {}
}
