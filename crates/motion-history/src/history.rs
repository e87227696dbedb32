//! Palm-center history buffer

use std::collections::VecDeque;

use hand_geometry::Point;
use tracing::debug;

/// Default number of retained positions
pub const DEFAULT_CAPACITY: usize = 10;

/// Default absence grace period before the trail is dropped (ms)
pub const DEFAULT_CLEAR_DELAY_MS: u64 = 700;

/// FIFO of the most recent palm centers, oldest first
#[derive(Debug, Clone)]
pub struct MotionHistory {
    positions: VecDeque<Point>,
    capacity: usize,
    clear_delay_ms: u64,
    /// Timestamp of the last frame with a hand
    last_seen_ms: Option<u64>,
}

impl MotionHistory {
    /// Create a history holding at most `capacity` positions
    pub fn new(capacity: usize, clear_delay_ms: u64) -> Self {
        let capacity = capacity.max(1);
        Self {
            positions: VecDeque::with_capacity(capacity),
            capacity,
            clear_delay_ms,
            last_seen_ms: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_CLEAR_DELAY_MS)
    }

    /// Record the palm center of a visible hand (drops the oldest if full)
    pub fn record(&mut self, center: Point, now_ms: u64) {
        if self.positions.len() >= self.capacity {
            self.positions.pop_front();
        }
        self.positions.push_back(center);
        self.last_seen_ms = Some(now_ms);
    }

    /// Note a frame without a hand. Clears the trail once the hand has been
    /// missing for longer than the grace period; returns whether it did.
    pub fn mark_absent(&mut self, now_ms: u64) -> bool {
        let Some(last_seen) = self.last_seen_ms else {
            return false;
        };
        if now_ms.saturating_sub(last_seen) > self.clear_delay_ms && !self.positions.is_empty() {
            debug!(
                "Motion history cleared after {}ms without a hand",
                now_ms.saturating_sub(last_seen)
            );
            self.positions.clear();
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<Point> {
        self.positions.front().copied()
    }

    pub fn newest(&self) -> Option<Point> {
        self.positions.back().copied()
    }

    /// (dx, dy) from the oldest to the newest position, saturating at the
    /// i32 range
    pub fn displacement(&self) -> Option<(i32, i32)> {
        let (first, last) = (self.oldest()?, self.newest()?);
        Some((last.x.saturating_sub(first.x), last.y.saturating_sub(first.y)))
    }

    /// Positions, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.positions.iter()
    }

    /// Drop all positions (keeps the last-seen timestamp)
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Drop positions and forget the hand entirely
    pub fn reset(&mut self) {
        self.positions.clear();
        self.last_seen_ms = None;
    }
}

impl Default for MotionHistory {
    fn default() -> Self {
        Self::with_defaults()
    }
}
