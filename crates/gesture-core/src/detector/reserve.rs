//! Numeric reserve selection (1, 2 or 3 raised fingers, thumb tucked)

use hand_geometry::landmarks::{INDEX_MCP, WRIST};
use tracing::{debug, info};

use super::{Detection, FrameContext, GestureDetector};
use crate::vote::VoteHistory;
use crate::{GestureConfig, ReserveSlot};

/// Thumb counts as tucked when it crosses wrist -> index base. This differs
/// from the like/dislike exclusion line, which runs to the index tip.
const THUMB_GATE: (usize, usize) = (WRIST, INDEX_MCP);

#[derive(Debug, Clone)]
struct ReserveState {
    votes: VoteHistory<ReserveSlot>,
    cooldown_until_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ReserveDetector {
    cooldown_ms: u64,
    majority_ratio: f64,
    history_len: usize,
    state: ReserveState,
}

impl ReserveDetector {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            cooldown_ms: config.reserve_cooldown_ms,
            majority_ratio: config.reserve_majority_ratio,
            history_len: config.reserve_history_len,
            state: ReserveState {
                votes: VoteHistory::new(config.reserve_history_len),
                cooldown_until_ms: None,
            },
        }
    }

    /// Finger pattern (index, middle, ring, pinky) to slot
    fn candidate(fingers: [bool; 4]) -> Option<ReserveSlot> {
        match fingers {
            [true, false, false, false] => Some(ReserveSlot::One),
            [true, true, false, false] => Some(ReserveSlot::Two),
            [true, true, true, false] => Some(ReserveSlot::Three),
            _ => None,
        }
    }
}

impl GestureDetector for ReserveDetector {
    fn name(&self) -> &'static str {
        "reserve"
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
                return None;
            }
        };

        if !hand.thumb_crosses(THUMB_GATE.0, THUMB_GATE.1) {
            return None;
        }

        let candidate = Self::candidate(hand.fingers().fingers());
        self.state.votes.push(candidate);

        let slot = candidate?;
        let share = self.state.votes.share_of(&slot);
        if share < self.majority_ratio {
            debug!(
                "Reserve {:?} at {:.0}% of {} votes",
                slot,
                share * 100.0,
                self.state.votes.len()
            );
            return None;
        }

        info!("Reserve {} confirmed", slot.number());
        self.state.votes.clear();
        self.state.cooldown_until_ms = Some(ctx.now_ms.saturating_add(self.cooldown_ms));
        Some(Detection::new(slot.event()))
    }

    fn reset(&mut self) {
        self.state = ReserveState {
            votes: VoteHistory::new(self.history_len),
            cooldown_until_ms: None,
        };
    }
}
