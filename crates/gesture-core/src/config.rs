//! Gesture tuning configuration

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::GestureError;

/// Prefix for environment overrides, e.g. `GESTURE_SWIPE_X_THRESHOLD_PX=90`
pub const ENV_PREFIX: &str = "GESTURE";

/// Gesture configuration. Times are milliseconds, distances pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Continuous open palm needed to confirm (ms)
    pub open_duration_ms: u64,

    /// How long a confirmation stays valid (ms)
    pub validity_duration_ms: u64,

    /// Palm drift that restarts open accumulation (px, either axis)
    pub movement_threshold_px: i32,

    /// Fist hold time before Pause (ms)
    pub fist_confirm_ms: u64,

    /// Horizontal travel for a swipe (px)
    pub swipe_x_threshold_px: i32,

    /// Vertical drift tolerated during a swipe (px)
    pub swipe_y_tolerance_px: i32,

    /// Max thumb-index tip distance for a pinch (px)
    pub pinch_threshold_px: f64,

    /// Volume units per pixel of vertical movement
    pub volume_scale: f64,

    /// Horizontal drift that rejects volume control (px)
    pub max_x_movement_px: i32,

    /// Vertical movement ignored as jitter (px)
    pub jitter_floor_px: i32,

    pub reserve_cooldown_ms: u64,
    pub reserve_history_len: usize,
    pub reserve_majority_ratio: f64,

    /// Thumb height above/below palm center for like/dislike (px)
    pub like_thumb_threshold_px: i32,
    pub like_history_len: usize,
    pub like_majority_ratio: f64,
    pub like_hold_time_ms: u64,
    pub like_cooldown_ms: u64,

    /// Palm-center positions kept for swipe detection
    pub motion_history_len: usize,

    /// Absence before the motion history is dropped (ms)
    pub open_clear_delay_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            open_duration_ms: 1000,
            validity_duration_ms: 1500,
            movement_threshold_px: 100,
            fist_confirm_ms: 500,
            swipe_x_threshold_px: 110,
            swipe_y_tolerance_px: 20,
            pinch_threshold_px: 40.0,
            volume_scale: 0.05,
            max_x_movement_px: 40,
            jitter_floor_px: 5,
            reserve_cooldown_ms: 2000,
            reserve_history_len: 20,
            reserve_majority_ratio: 0.8,
            like_thumb_threshold_px: 10,
            like_history_len: 15,
            like_majority_ratio: 0.6,
            like_hold_time_ms: 500,
            like_cooldown_ms: 1500,
            motion_history_len: 10,
            open_clear_delay_ms: 700,
        }
    }
}

impl GestureConfig {
    /// Create strict config (longer holds, stronger majorities)
    pub fn strict() -> Self {
        Self {
            open_duration_ms: 1500,
            fist_confirm_ms: 800,
            swipe_x_threshold_px: 140,
            swipe_y_tolerance_px: 15,
            reserve_majority_ratio: 0.9,
            like_majority_ratio: 0.75,
            like_hold_time_ms: 800,
            ..Default::default()
        }
    }

    /// Create lenient config (quicker confirmation, looser thresholds)
    pub fn lenient() -> Self {
        Self {
            open_duration_ms: 700,
            validity_duration_ms: 2500,
            fist_confirm_ms: 300,
            swipe_x_threshold_px: 90,
            swipe_y_tolerance_px: 30,
            reserve_majority_ratio: 0.7,
            like_majority_ratio: 0.5,
            like_hold_time_ms: 300,
            ..Default::default()
        }
    }

    /// Load from an optional TOML file layered under `GESTURE_*` environment
    /// variables. Unset keys keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, GestureError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            info!("Loading gesture configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document. Unset keys keep their defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, GestureError> {
        let config: Self = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a detector meaningless
    pub fn validate(&self) -> Result<(), GestureError> {
        let invalid = |msg: String| Err(GestureError::Config(msg));

        if self.open_duration_ms == 0 {
            return invalid("open_duration_ms must be positive".into());
        }
        if self.validity_duration_ms == 0 {
            return invalid("validity_duration_ms must be positive".into());
        }
        for (name, len) in [
            ("reserve_history_len", self.reserve_history_len),
            ("like_history_len", self.like_history_len),
            ("motion_history_len", self.motion_history_len),
        ] {
            if len == 0 {
                return invalid(format!("{name} must be at least 1"));
            }
        }
        for (name, ratio) in [
            ("reserve_majority_ratio", self.reserve_majority_ratio),
            ("like_majority_ratio", self.like_majority_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return invalid(format!("{name} must be in (0, 1], got {ratio}"));
            }
        }
        for (name, px) in [
            ("movement_threshold_px", self.movement_threshold_px),
            ("swipe_x_threshold_px", self.swipe_x_threshold_px),
            ("swipe_y_tolerance_px", self.swipe_y_tolerance_px),
            ("max_x_movement_px", self.max_x_movement_px),
            ("jitter_floor_px", self.jitter_floor_px),
            ("like_thumb_threshold_px", self.like_thumb_threshold_px),
        ] {
            if px < 0 {
                return invalid(format!("{name} must not be negative, got {px}"));
            }
        }
        if !(self.pinch_threshold_px >= 0.0) {
            return invalid("pinch_threshold_px must not be negative".into());
        }
        if !(self.volume_scale > 0.0) {
            return invalid("volume_scale must be positive".into());
        }
        Ok(())
    }
}
