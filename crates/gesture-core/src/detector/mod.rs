//! Stateful gesture detectors
//!
//! Every detector owns its private debounce/cooldown/vote state and sees the
//! rest of the frame only through an immutable [`FrameContext`]. Effects on
//! shared tracker state (motion history, open-palm confirmation) are
//! returned as [`FollowUp`] requests and applied by the tracker.

mod like_dislike;
mod reserve;
mod stop;
mod swipe;
mod volume;

pub use like_dislike::LikeDislikeDetector;
pub use reserve::ReserveDetector;
pub use stop::StopDetector;
pub use swipe::SwipeDetector;
pub use volume::VolumeDetector;

use hand_geometry::{FingerStatus, HandLandmarks};
use motion_history::MotionHistory;

use crate::GestureEvent;

/// Read-only view of one frame, built after the confirmation update
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub now_ms: u64,
    /// First hand, if it carried a complete landmark set
    pub hand: Option<&'a HandLandmarks>,
    /// Open-palm confirmation for this frame, computed once
    pub open_confirmed: bool,
    pub motion: &'a MotionHistory,
}

impl<'a> FrameContext<'a> {
    pub fn fingers(&self) -> Option<FingerStatus> {
        self.hand.map(HandLandmarks::fingers)
    }

    pub fn is_open_palm(&self) -> bool {
        self.hand.is_some_and(HandLandmarks::is_open_palm)
    }

    pub fn is_fist(&self) -> bool {
        self.hand.is_some_and(HandLandmarks::is_fist)
    }
}

/// Change to shared tracker state requested by a detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Empty the palm-center trail
    ClearMotionHistory,
    /// Drop the open-palm confirmation so it must be earned again
    ResetConfirmation,
    /// Restart open-palm accumulation from the current frame
    RestartAccumulation,
}

/// A fired gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub event: GestureEvent,
    pub follow_up: Option<FollowUp>,
}

impl Detection {
    pub fn new(event: GestureEvent) -> Self {
        Self {
            event,
            follow_up: None,
        }
    }

    pub fn with_follow_up(event: GestureEvent, follow_up: FollowUp) -> Self {
        Self {
            event,
            follow_up: Some(follow_up),
        }
    }
}

/// One gesture classifier in the dispatch chain
pub trait GestureDetector: Send {
    fn name(&self) -> &'static str;

    /// Runs every frame before the open-palm confirmation update
    fn prepare(&mut self, _hand: Option<&HandLandmarks>, _motion: &MotionHistory) -> Option<FollowUp> {
        None
    }

    /// Evaluate the frame. Only reached when every higher-priority
    /// detector returned `None`.
    fn detect(&mut self, ctx: &FrameContext<'_>) -> Option<Detection>;

    /// Forget all timers and votes
    fn reset(&mut self);
}
