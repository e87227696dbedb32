//! Thumb up / thumb down rating
//!
//! A candidate must dominate the vote window and then stay the stable
//! majority for `hold_time_ms` before it fires.

use hand_geometry::landmarks::{INDEX_TIP, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP, WRIST};
use hand_geometry::HandLandmarks;
use tracing::{debug, info};

use super::{Detection, FrameContext, GestureDetector};
use crate::vote::VoteHistory;
use crate::{GestureConfig, Rating};

/// A thumb crossing wrist -> index tip lies across the palm and disqualifies
/// the frame. Not the same line as the reserve thumb gate.
const THUMB_EXCLUSION: (usize, usize) = (WRIST, INDEX_TIP);

const OTHER_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

#[derive(Debug, Clone)]
struct LikeState {
    votes: VoteHistory<Rating>,
    /// Majority candidate currently being held
    stable: Option<Rating>,
    hold_since_ms: Option<u64>,
    cooldown_until_ms: Option<u64>,
}

impl LikeState {
    fn new(history_len: usize) -> Self {
        Self {
            votes: VoteHistory::new(history_len),
            stable: None,
            hold_since_ms: None,
            cooldown_until_ms: None,
        }
    }

    fn clear_hold(&mut self) {
        self.stable = None;
        self.hold_since_ms = None;
    }
}

#[derive(Debug, Clone)]
pub struct LikeDislikeDetector {
    thumb_threshold_px: i32,
    history_len: usize,
    majority_ratio: f64,
    hold_time_ms: u64,
    cooldown_ms: u64,
    state: LikeState,
}

impl LikeDislikeDetector {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            thumb_threshold_px: config.like_thumb_threshold_px,
            history_len: config.like_history_len,
            majority_ratio: config.like_majority_ratio,
            hold_time_ms: config.like_hold_time_ms,
            cooldown_ms: config.like_cooldown_ms,
            state: LikeState::new(config.like_history_len),
        }
    }

    fn candidate(&self, hand: &HandLandmarks) -> Option<Rating> {
        let thumb = hand.point(THUMB_TIP);
        let center = hand.palm_center();
        let tips = OTHER_TIPS.map(|i| hand.point(i).y);

        let above = center.y.saturating_sub(self.thumb_threshold_px);
        let below = center.y.saturating_add(self.thumb_threshold_px);

        if thumb.y < above && tips.iter().all(|&y| y > thumb.y) {
            Some(Rating::Like)
        } else if thumb.y > below && tips.iter().all(|&y| y < thumb.y) {
            Some(Rating::Dislike)
        } else {
            None
        }
    }
}

impl GestureDetector for LikeDislikeDetector {
    fn name(&self) -> &'static str {
        "like_dislike"
    }

    fn detect(&mut self, ctx: &FrameContext<'_>) -> Option<Detection> {
        if self
            .state
            .cooldown_until_ms
            .is_some_and(|until| ctx.now_ms < until)
        {
            return None;
        }

        let hand = match ctx.hand {
            Some(hand) if ctx.open_confirmed => hand,
            _ => {
                self.state.votes.clear();
                self.state.clear_hold();
                return None;
            }
        };

        if hand.thumb_crosses(THUMB_EXCLUSION.0, THUMB_EXCLUSION.1) {
            return None;
        }

        let candidate = self.candidate(hand);
        self.state.votes.push(candidate);

        let Some(rating) = candidate else {
            // Cooldown survives, hold does not
            self.state.clear_hold();
            return None;
        };

        if self.state.votes.share_of(&rating) < self.majority_ratio {
            return None;
        }

        match (self.state.stable, self.state.hold_since_ms) {
            (Some(stable), Some(since)) if stable == rating => {
                if ctx.now_ms.saturating_sub(since) < self.hold_time_ms {
                    return None;
                }
                info!("{:?} confirmed after {}ms hold", rating, ctx.now_ms.saturating_sub(since));
                self.state.votes.clear();
                self.state.clear_hold();
                self.state.cooldown_until_ms = Some(ctx.now_ms.saturating_add(self.cooldown_ms));
                Some(Detection::new(rating.event()))
            }
            _ => {
                debug!("{:?} became majority, holding", rating);
                self.state.stable = Some(rating);
                self.state.hold_since_ms = Some(ctx.now_ms);
                None
            }
        }
    }

    fn reset(&mut self) {
        self.state = LikeState::new(self.history_len);
    }
}
