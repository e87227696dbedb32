//! Finger pose classification

use serde::{Deserialize, Serialize};

use crate::landmarks::{
    HandLandmarks, Point, FINGER_JOINTS, INDEX_TIP, LANDMARK_COUNT, THUMB_IP, THUMB_TIP, WRIST,
};

/// Up/down state of each finger. `true` = extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FingerStatus {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStatus {
    /// As `[thumb, index, middle, ring, pinky]`
    pub fn to_array(self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    /// Index, middle, ring and pinky, thumb excluded
    pub fn fingers(self) -> [bool; 4] {
        [self.index, self.middle, self.ring, self.pinky]
    }

    /// Number of extended fingers, thumb excluded
    pub fn extended_fingers(self) -> usize {
        self.fingers().iter().filter(|&&up| up).count()
    }
}

/// Classify each finger of a raw landmark list.
///
/// The thumb is up when its tip lies right of the IP joint, which assumes
/// the canonical orientation. Other fingers are up when the tip is higher
/// on the image (smaller y) than the PIP joint. Returns `None` when the
/// list is too short.
pub fn finger_status(points: &[Point]) -> Option<FingerStatus> {
    if points.len() < LANDMARK_COUNT {
        return None;
    }

    let up = |(pip, tip): (usize, usize)| points[tip].y < points[pip].y;
    let [index, middle, ring, pinky] = FINGER_JOINTS.map(up);

    Some(FingerStatus {
        thumb: points[THUMB_TIP].x > points[THUMB_IP].x,
        index,
        middle,
        ring,
        pinky,
    })
}

/// At least four non-thumb fingers extended on a complete hand
pub fn is_open_palm(points: &[Point]) -> bool {
    if points.len() != LANDMARK_COUNT {
        return false;
    }
    finger_status(points).is_some_and(|fs| fs.extended_fingers() >= 4)
}

/// All four fingers folded and the thumb closed across the palm
/// (thumb CMC to tip crossing wrist to index tip).
pub fn is_fist(points: &[Point]) -> bool {
    match HandLandmarks::from_points(points) {
        Ok(hand) => hand.is_fist(),
        Err(_) => false,
    }
}

impl HandLandmarks {
    pub fn fingers(&self) -> FingerStatus {
        // Always complete, so classification cannot fail
        finger_status(self.as_slice()).unwrap_or_default()
    }

    pub fn is_open_palm(&self) -> bool {
        self.fingers().extended_fingers() >= 4
    }

    pub fn is_fist(&self) -> bool {
        let folded = FINGER_JOINTS
            .iter()
            .all(|&(pip, tip)| self.point(tip).y > self.point(pip).y);

        folded && self.thumb_crosses(WRIST, INDEX_TIP)
    }
}
