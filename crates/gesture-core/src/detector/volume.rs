//! Pinch-and-slide volume control
//!
//! After open-palm confirmation, folding the index finger and pinching the
//! thumb tip against it enters volume mode. Vertical palm movement between
//! consecutive frames is reported as a continuous delta: up raises the
//! volume, down lowers it. Horizontal drift beyond `max_x_movement_px`
//! rejects the frame.

use hand_geometry::landmarks::{INDEX_TIP, THUMB_TIP};
use hand_geometry::{distance, Point};
use tracing::debug;

use super::{Detection, FrameContext, GestureDetector};
use crate::{GestureConfig, GestureEvent};

#[derive(Debug, Clone, Default)]
struct VolumeState {
    /// Horizontal anchor for the current volume session
    reference_x: Option<i32>,
    /// Palm center on the previous pinched frame
    reference_center: Option<Point>,
}

#[derive(Debug, Clone)]
pub struct VolumeDetector {
    pinch_threshold_px: f64,
    volume_scale: f64,
    max_x_movement_px: i32,
    jitter_floor_px: i32,
    state: VolumeState,
}

impl VolumeDetector {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            pinch_threshold_px: config.pinch_threshold_px,
            volume_scale: config.volume_scale,
            max_x_movement_px: config.max_x_movement_px,
            jitter_floor_px: config.jitter_floor_px,
            state: VolumeState::default(),
        }
    }
}

impl GestureDetector for VolumeDetector {
    fn name(&self) -> &'static str {
        "volume"
    }

    fn detect(&mut self, ctx: &FrameContext<'_>) -> Option<Detection> {
        let hand = match ctx.hand {
            Some(hand) if ctx.open_confirmed && !hand.fingers().index => hand,
            _ => {
                self.reset();
                return None;
            }
        };

        let center = hand.palm_center();
        let reference_x = *self.state.reference_x.get_or_insert(center.x);
        if center.x.abs_diff(reference_x) > self.max_x_movement_px.unsigned_abs() {
            return None;
        }

        if distance(hand.point(THUMB_TIP), hand.point(INDEX_TIP)) > self.pinch_threshold_px {
            self.state.reference_center = None;
            return None;
        }

        // Reference follows the palm every frame for continuous control
        let previous = self.state.reference_center.replace(center)?;
        let dy = i64::from(center.y) - i64::from(previous.y);
        if dy.abs() < i64::from(self.jitter_floor_px) {
            return None;
        }

        let delta = f64::from(center.y.abs_diff(previous.y)) * self.volume_scale;
        debug!("Volume slide dy={} delta={:.2}", dy, delta);
        let event = if dy < 0 {
            GestureEvent::VolumeUp(delta)
        } else {
            GestureEvent::VolumeDown(delta)
        };
        Some(Detection::new(event))
    }

    fn reset(&mut self) {
        self.state = VolumeState::default();
    }
}
