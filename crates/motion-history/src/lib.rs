//! Motion History
//!
//! Bounded FIFO of recent palm-center positions, refreshed every frame a
//! hand is visible and dropped after the hand has been gone for a grace
//! period.

mod history;

pub use history::{MotionHistory, DEFAULT_CAPACITY, DEFAULT_CLEAR_DELAY_MS};
