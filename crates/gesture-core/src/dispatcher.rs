//! Fixed-priority gesture dispatch
//!
//! Priority: Stop > Reserve > Like/Dislike > Swipe > Volume. The stop
//! gesture pre-empts everything; explicit selections pre-empt the
//! continuous gestures, which are the easiest to trigger by accident.

use hand_geometry::HandLandmarks;
use motion_history::MotionHistory;
use tracing::debug;

use crate::detector::{
    Detection, FollowUp, FrameContext, GestureDetector, LikeDislikeDetector, ReserveDetector,
    StopDetector, SwipeDetector, VolumeDetector,
};
use crate::GestureConfig;

pub struct Dispatcher {
    /// Highest priority first
    detectors: Vec<Box<dyn GestureDetector>>,
}

impl Dispatcher {
    /// Standard detector chain
    pub fn new(config: &GestureConfig) -> Self {
        Self::with_detectors(vec![
            Box::new(StopDetector::new(config)),
            Box::new(ReserveDetector::new(config)),
            Box::new(LikeDislikeDetector::new(config)),
            Box::new(SwipeDetector::new(config)),
            Box::new(VolumeDetector::new(config)),
        ])
    }

    /// Custom chain, highest priority first
    pub fn with_detectors(detectors: Vec<Box<dyn GestureDetector>>) -> Self {
        Self { detectors }
    }

    /// Detector names in priority order
    pub fn order(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Pre-confirmation pass over every detector
    pub fn prepare(&mut self, hand: Option<&HandLandmarks>, motion: &MotionHistory) -> Vec<FollowUp> {
        self.detectors
            .iter_mut()
            .filter_map(|d| d.prepare(hand, motion))
            .collect()
    }

    /// First detection in priority order. Lower-priority detectors are not
    /// evaluated once one fires.
    pub fn dispatch(&mut self, ctx: &FrameContext<'_>) -> Option<Detection> {
        self.detectors.iter_mut().find_map(|detector| {
            let detection = detector.detect(ctx)?;
            debug!("{} fired {}", detector.name(), detection.event);
            Some(detection)
        })
    }

    pub fn reset(&mut self) {
        for detector in &mut self.detectors {
            detector.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::GestureEvent;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fires a fixed event and counts evaluations
    struct Scripted {
        name: &'static str,
        event: Option<GestureEvent>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn boxed(name: &'static str, event: Option<GestureEvent>) -> (Box<dyn GestureDetector>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let detector = Scripted {
                name,
                event,
                calls: Arc::clone(&calls),
            };
            (Box::new(detector), calls)
        }
    }

    impl GestureDetector for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        fn detect(&mut self, _ctx: &FrameContext<'_>) -> Option<Detection> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.event.map(Detection::new)
        }

        fn reset(&mut self) {}
    }

    fn ctx<'a>(hand: &'a HandLandmarks, motion: &'a MotionHistory) -> FrameContext<'a> {
        FrameContext {
            now_ms: 0,
            hand: Some(hand),
            open_confirmed: true,
            motion,
        }
    }

    #[test]
    fn test_standard_order() {
        let dispatcher = Dispatcher::new(&GestureConfig::default());
        assert_eq!(
            dispatcher.order(),
            vec!["stop", "reserve", "like_dislike", "swipe", "volume"]
        );
    }

    #[test]
    fn test_stop_preempts_swipe() {
        let (stop, _) = Scripted::boxed("stop", Some(GestureEvent::Pause));
        let (swipe, swipe_calls) = Scripted::boxed("swipe", Some(GestureEvent::Next));
        let mut dispatcher = Dispatcher::with_detectors(vec![stop, swipe]);

        let hand = fixtures::open_palm();
        let motion = MotionHistory::default();
        let detection = dispatcher.dispatch(&ctx(&hand, &motion)).unwrap();

        assert_eq!(detection.event, GestureEvent::Pause);
        assert_eq!(swipe_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_falls_through_to_lower_priority() {
        let (stop, stop_calls) = Scripted::boxed("stop", None);
        let (reserve, reserve_calls) = Scripted::boxed("reserve", None);
        let (volume, _) = Scripted::boxed("volume", Some(GestureEvent::VolumeUp(1.0)));
        let mut dispatcher = Dispatcher::with_detectors(vec![stop, reserve, volume]);

        let hand = fixtures::pinch();
        let motion = MotionHistory::default();
        let detection = dispatcher.dispatch(&ctx(&hand, &motion)).unwrap();

        assert_eq!(detection.event, GestureEvent::VolumeUp(1.0));
        assert_eq!(stop_calls.load(Ordering::SeqCst), 1);
        assert_eq!(reserve_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_nothing_fires() {
        let (stop, _) = Scripted::boxed("stop", None);
        let mut dispatcher = Dispatcher::with_detectors(vec![stop]);

        let hand = fixtures::open_palm();
        let motion = MotionHistory::default();
        assert!(dispatcher.dispatch(&ctx(&hand, &motion)).is_none());
    }
}
