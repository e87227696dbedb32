//! Single-frame pose classification, no temporal state

use hand_geometry::landmarks::{FINGER_JOINTS, INDEX_TIP, PINKY_TIP, THUMB_IP, THUMB_TIP};
use hand_geometry::HandLandmarks;

use crate::GestureEvent;

/// Horizontal thumb offset for the pointing poses (px)
const THUMB_POINT_OFFSET: i32 = 40;

/// Classify a single frame:
/// - fist with thumb pointing right of the index tip => `Next`
/// - fist with thumb pointing left of the pinky tip => `Previous`
/// - index and middle raised, ring and pinky folded, thumb lowered => `Play`
/// - all fingers folded, thumb lowered => `Pause`
///
/// Folded means the tip is strictly below its PIP joint; a tip level with
/// the joint is neither raised nor folded.
pub fn classify_static(hand: Option<&HandLandmarks>) -> GestureEvent {
    let Some(hand) = hand else {
        return GestureEvent::NoHand;
    };

    let raised = hand.fingers().fingers();
    let folded = FINGER_JOINTS.map(|(pip, tip)| hand.point(tip).y > hand.point(pip).y);
    let all_folded = folded.iter().all(|&f| f);
    let thumb = hand.point(THUMB_TIP);
    let thumb_lowered = thumb.y > hand.point(THUMB_IP).y;

    let right_of_index = hand.point(INDEX_TIP).x.saturating_add(THUMB_POINT_OFFSET);
    let left_of_pinky = hand.point(PINKY_TIP).x.saturating_sub(THUMB_POINT_OFFSET);

    if all_folded && thumb.x > right_of_index {
        GestureEvent::Next
    } else if all_folded && thumb.x < left_of_pinky {
        GestureEvent::Previous
    } else if raised[0] && raised[1] && folded[2] && folded[3] && thumb_lowered {
        GestureEvent::Play
    } else if all_folded && thumb_lowered {
        GestureEvent::Pause
    } else {
        GestureEvent::Unknown
    }
}
