//! Hand poses for tests. Right hand, palm facing the camera, wrist at
//! (200, 400) and palm center at (200, 347).

use hand_geometry::{HandLandmarks, Point};

fn hand(points: [(i32, i32); 21]) -> HandLandmarks {
    let points: Vec<Point> = points.into_iter().map(Point::from).collect();
    HandLandmarks::from_points(&points).expect("fixture has 21 points")
}

const WRIST: (i32, i32) = (200, 400);
const THUMB_OUT: [(i32, i32); 4] = [(230, 380), (260, 360), (285, 340), (310, 320)];
const THUMB_TUCKED: [(i32, i32); 4] = [(235, 385), (240, 360), (225, 345), (190, 340)];

const INDEX_UP: [(i32, i32); 4] = [(220, 300), (220, 250), (220, 220), (220, 190)];
const MIDDLE_UP: [(i32, i32); 4] = [(200, 295), (200, 240), (200, 205), (200, 175)];
const RING_UP: [(i32, i32); 4] = [(180, 300), (180, 250), (180, 220), (180, 195)];
const PINKY_UP: [(i32, i32); 4] = [(160, 310), (160, 270), (160, 250), (160, 230)];

const INDEX_DOWN: [(i32, i32); 4] = [(220, 300), (220, 280), (215, 300), (212, 315)];
const MIDDLE_DOWN: [(i32, i32); 4] = [(200, 295), (200, 275), (197, 297), (195, 312)];
const RING_DOWN: [(i32, i32); 4] = [(180, 300), (180, 282), (178, 300), (176, 314)];
const PINKY_DOWN: [(i32, i32); 4] = [(160, 310), (162, 292), (162, 308), (162, 320)];

fn assemble(thumb: [(i32, i32); 4], fingers: [[(i32, i32); 4]; 4]) -> HandLandmarks {
    let mut points = [WRIST; 21];
    points[1..5].copy_from_slice(&thumb);
    for (i, finger) in fingers.iter().enumerate() {
        let start = 5 + i * 4;
        points[start..start + 4].copy_from_slice(finger);
    }
    hand(points)
}

pub fn open_palm() -> HandLandmarks {
    assemble(THUMB_OUT, [INDEX_UP, MIDDLE_UP, RING_UP, PINKY_UP])
}

pub fn fist() -> HandLandmarks {
    assemble(THUMB_TUCKED, [INDEX_DOWN, MIDDLE_DOWN, RING_DOWN, PINKY_DOWN])
}

/// Thumb tucked, the first `count` fingers raised (1..=3)
pub fn reserve(count: usize) -> HandLandmarks {
    let up = [INDEX_UP, MIDDLE_UP, RING_UP, PINKY_UP];
    let down = [INDEX_DOWN, MIDDLE_DOWN, RING_DOWN, PINKY_DOWN];
    let fingers = std::array::from_fn(|i| if i < count { up[i] } else { down[i] });
    assemble(THUMB_TUCKED, fingers)
}

/// Fingers curled, thumb pointing up
pub fn thumb_up() -> HandLandmarks {
    assemble(
        [(235, 385), (238, 340), (239, 290), (240, 250)],
        [INDEX_DOWN, MIDDLE_DOWN, RING_DOWN, PINKY_DOWN],
    )
}

/// Fingers curled, thumb pointing down
pub fn thumb_down() -> HandLandmarks {
    assemble(
        [(235, 385), (238, 395), (239, 408), (240, 420)],
        [INDEX_DOWN, MIDDLE_DOWN, RING_DOWN, PINKY_DOWN],
    )
}

/// Index folded with the thumb tip pinched against it
pub fn pinch() -> HandLandmarks {
    assemble(
        [(235, 385), (236, 360), (232, 340), (225, 320)],
        [INDEX_DOWN, MIDDLE_DOWN, RING_DOWN, PINKY_DOWN],
    )
}
