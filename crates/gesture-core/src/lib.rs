//! Gesture Core
//!
//! Turns a per-frame stream of hand landmarks into discrete media-control
//! events:
//! - Open-palm confirmation (hysteresis + validity window)
//! - Stop, reserve-number, like/dislike, swipe and volume detectors
//! - Fixed-priority dispatch, at most one event per frame
//! - Single-frame static pose classification

pub mod config;
pub mod confirmation;
pub mod detector;
pub mod dispatcher;
pub mod event;
pub mod static_pose;
pub mod tracker;
pub mod vote;

#[cfg(test)]
mod fixtures;

pub use config::GestureConfig;
pub use confirmation::{ConfirmationPhase, FrameTick, OpenConfirmation, OpenSignal, PalmObservation};
pub use detector::{Detection, FollowUp, FrameContext, GestureDetector};
pub use dispatcher::Dispatcher;
pub use event::{GestureEvent, Rating, ReserveSlot};
pub use static_pose::classify_static;
pub use tracker::{Clock, ConfirmationCue, HandTracker, SilentCue, SystemClock};

pub use hand_geometry::{HandLandmarks, LandmarkError, Point};
pub use motion_history::MotionHistory;

use thiserror::Error;

/// Gesture core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    #[error("Invalid landmarks: {0}")]
    InvalidLandmarks(#[from] LandmarkError),

    /// The confirmation query advances timers and may run once per frame
    #[error("Open-palm confirmation already evaluated for frame {frame}")]
    ConfirmationReentered { frame: u64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<::config::ConfigError> for GestureError {
    fn from(err: ::config::ConfigError) -> Self {
        GestureError::Config(err.to_string())
    }
}
