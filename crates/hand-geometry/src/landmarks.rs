//! Landmark points and named indices
//!
//! Index layout follows the 21-point hand model:
//!
//! ```text
//! WRIST   0
//! THUMB   1-4
//! INDEX   5-8
//! MIDDLE  9-12
//! RING    13-16
//! PINKY   17-20
//! ```

use serde::{Deserialize, Serialize};

use crate::error::LandmarkError;

/// Number of landmarks in a complete hand
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// (PIP, TIP) pairs for index, middle, ring and pinky
pub const FINGER_JOINTS: [(usize, usize); 4] = [
    (INDEX_PIP, INDEX_TIP),
    (MIDDLE_PIP, MIDDLE_TIP),
    (RING_PIP, RING_TIP),
    (PINKY_PIP, PINKY_TIP),
];

/// Pixel-space point. Serialized as an `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Midpoint, rounded toward negative infinity. Exact for any pair of
    /// coordinates.
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: mid(self.x, other.x),
            y: mid(self.y, other.y),
        }
    }

    /// Translate by (dx, dy), saturating at the i32 range
    pub fn offset(self, dx: i32, dy: i32) -> Point {
        Point {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

fn mid(a: i32, b: i32) -> i32 {
    // Mean of two i32 values always fits back into i32
    (i64::from(a) + i64::from(b)).div_euclid(2) as i32
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Complete, validated set of 21 landmarks for one hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandLandmarks {
    points: [Point; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Validate a landmark list. Anything but exactly 21 points is rejected.
    pub fn from_points(points: &[Point]) -> Result<Self, LandmarkError> {
        let points: [Point; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| LandmarkError::InvalidLandmarkCount {
                    expected: LANDMARK_COUNT,
                    actual: points.len(),
                })?;
        Ok(Self { points })
    }

    /// Landmark by index (see the constants in this module)
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANDMARK_COUNT`.
    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Midpoint of wrist and middle finger base
    pub fn palm_center(&self) -> Point {
        self.points[WRIST].midpoint(self.points[MIDDLE_MCP])
    }

    /// Copy of this hand translated by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        let mut points = self.points;
        for p in points.iter_mut() {
            *p = p.offset(dx, dy);
        }
        Self { points }
    }

    /// Whether the thumb (CMC to tip) crosses the segment between two landmarks
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is not below `LANDMARK_COUNT`.
    pub fn thumb_crosses(&self, from: usize, to: usize) -> bool {
        crate::segments_intersect(
            self.points[THUMB_CMC],
            self.points[THUMB_TIP],
            self.points[from],
            self.points[to],
        )
    }
}

impl TryFrom<&[Point]> for HandLandmarks {
    type Error = LandmarkError;

    fn try_from(points: &[Point]) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

/// Palm center of a raw landmark list, `None` if wrist or middle base is missing
pub fn palm_center(points: &[Point]) -> Option<Point> {
    let wrist = points.get(WRIST)?;
    let middle_mcp = points.get(MIDDLE_MCP)?;
    Some(wrist.midpoint(*middle_mcp))
}
