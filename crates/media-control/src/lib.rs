//! Media Control
//!
//! Maps gesture events to media-player commands and suppresses repeated
//! discrete commands within a cooldown.

mod controller;

pub use controller::{ControllerConfig, GestureController, MediaCommand, MediaPlayer, PlayerError};
