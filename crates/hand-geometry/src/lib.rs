//! Hand Geometry Primitives
//!
//! Stateless geometry over the 21-point hand landmark model:
//! - Landmark validation and named indices
//! - Per-finger up/down classification
//! - Open palm and fist tests
//! - Palm center estimation and segment intersection

mod error;
mod fingers;
pub mod landmarks;
mod segment;

pub use error::LandmarkError;
pub use fingers::{finger_status, is_fist, is_open_palm, FingerStatus};
pub use landmarks::{palm_center, HandLandmarks, Point, LANDMARK_COUNT};
pub use segment::{distance, segments_intersect};
