//! Gesture events emitted once per frame

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of one frame of gesture tracking
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "gesture", content = "delta")]
pub enum GestureEvent {
    Next,
    Previous,
    Play,
    Pause,
    Reserve1,
    Reserve2,
    Reserve3,
    Like,
    Dislike,
    /// Palm moved up while pinched; delta in volume units
    VolumeUp(f64),
    /// Palm moved down while pinched; delta in volume units
    VolumeDown(f64),
    /// Hand present but no known static pose
    Unknown,
    /// No valid hand in the frame
    NoHand,
    /// Hand present, nothing fired
    #[default]
    NoGesture,
}

impl GestureEvent {
    /// Whether this event should reach the media controller
    pub fn is_detection(&self) -> bool {
        !matches!(
            self,
            GestureEvent::Unknown | GestureEvent::NoHand | GestureEvent::NoGesture
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            GestureEvent::Next => "Next",
            GestureEvent::Previous => "Previous",
            GestureEvent::Play => "Play",
            GestureEvent::Pause => "Pause",
            GestureEvent::Reserve1 => "Reserve1",
            GestureEvent::Reserve2 => "Reserve2",
            GestureEvent::Reserve3 => "Reserve3",
            GestureEvent::Like => "Like",
            GestureEvent::Dislike => "Dislike",
            GestureEvent::VolumeUp(_) => "VolumeUp",
            GestureEvent::VolumeDown(_) => "VolumeDown",
            GestureEvent::Unknown => "Unknown",
            GestureEvent::NoHand => "NoHand",
            GestureEvent::NoGesture => "None",
        }
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureEvent::VolumeUp(delta) | GestureEvent::VolumeDown(delta) => {
                write!(f, "{}({:.2})", self.label(), delta)
            }
            _ => f.write_str(self.label()),
        }
    }
}

/// Numeric selection made with the reserve gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReserveSlot {
    One,
    Two,
    Three,
}

impl ReserveSlot {
    pub fn number(self) -> u8 {
        match self {
            ReserveSlot::One => 1,
            ReserveSlot::Two => 2,
            ReserveSlot::Three => 3,
        }
    }

    pub fn event(self) -> GestureEvent {
        match self {
            ReserveSlot::One => GestureEvent::Reserve1,
            ReserveSlot::Two => GestureEvent::Reserve2,
            ReserveSlot::Three => GestureEvent::Reserve3,
        }
    }
}

/// Thumb up or down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Like,
    Dislike,
}

impl Rating {
    pub fn event(self) -> GestureEvent {
        match self {
            Rating::Like => GestureEvent::Like,
            Rating::Dislike => GestureEvent::Dislike,
        }
    }
}
