//! Hand tracker: one instance per camera/user session
//!
//! Call order inside a tick is fixed: hand selection and motion update,
//! detector preparation, exactly one confirmation update, then the
//! dispatcher pass. The tracker is single-threaded and provides no
//! internal locking.

use std::time::{SystemTime, UNIX_EPOCH};

use hand_geometry::{HandLandmarks, Point};
use motion_history::MotionHistory;
use tracing::{debug, info, warn};

use crate::confirmation::{FrameTick, OpenConfirmation, PalmObservation};
use crate::detector::{FollowUp, FrameContext};
use crate::dispatcher::Dispatcher;
use crate::{GestureConfig, GestureError, GestureEvent};

/// Wall-clock source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// System time since the Unix epoch
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Notified once each time an open palm is confirmed (e.g. an audible cue)
pub trait ConfirmationCue: Send {
    fn open_confirmed(&self);
}

impl<F: Fn() + Send> ConfirmationCue for F {
    fn open_confirmed(&self) {
        self()
    }
}

/// Cue that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl ConfirmationCue for SilentCue {
    fn open_confirmed(&self) {}
}

pub struct HandTracker<C: Clock = SystemClock> {
    config: GestureConfig,
    confirmation: OpenConfirmation,
    motion: MotionHistory,
    dispatcher: Dispatcher,
    clock: C,
    cue: Box<dyn ConfirmationCue>,
    tick: FrameTick,
}

impl HandTracker<SystemClock> {
    /// Create a tracker on the system clock
    pub fn new(config: GestureConfig) -> Result<Self, GestureError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> HandTracker<C> {
    pub fn with_clock(config: GestureConfig, clock: C) -> Result<Self, GestureError> {
        config.validate()?;
        info!("Creating hand tracker with config: {:?}", config);
        Ok(Self {
            confirmation: OpenConfirmation::new(&config),
            motion: MotionHistory::new(config.motion_history_len, config.open_clear_delay_ms),
            dispatcher: Dispatcher::new(&config),
            clock,
            cue: Box::new(SilentCue),
            tick: FrameTick::default(),
            config,
        })
    }

    /// Replace the detector chain (highest priority first)
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_cue(mut self, cue: impl ConfirmationCue + 'static) -> Self {
        self.cue = Box::new(cue);
        self
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn motion(&self) -> &MotionHistory {
        &self.motion
    }

    pub fn confirmation(&self) -> &OpenConfirmation {
        &self.confirmation
    }

    /// Process one frame stamped with the tracker clock
    pub fn process(&mut self, hands: &[Vec<Point>]) -> Result<GestureEvent, GestureError> {
        let now_ms = self.clock.now_ms();
        self.process_at(hands, now_ms)
    }

    /// Process one frame. Only the first hand is consulted; a hand without
    /// exactly 21 landmarks is rejected and the frame treated as handless.
    pub fn process_at(&mut self, hands: &[Vec<Point>], now_ms: u64) -> Result<GestureEvent, GestureError> {
        self.tick = self.tick.next();

        let hand = hands
            .first()
            .and_then(|points| match HandLandmarks::from_points(points) {
                Ok(hand) => Some(hand),
                Err(e) => {
                    warn!("Rejected hand in frame {}: {}", self.tick.0, e);
                    None
                }
            });

        match &hand {
            Some(hand) => self.motion.record(hand.palm_center(), now_ms),
            None => {
                self.motion.mark_absent(now_ms);
            }
        }

        for follow_up in self.dispatcher.prepare(hand.as_ref(), &self.motion) {
            self.apply(follow_up, now_ms);
        }

        let observation = match &hand {
            None => PalmObservation::NoHand,
            Some(hand) if hand.is_open_palm() => PalmObservation::Open,
            Some(_) => PalmObservation::NotOpen,
        };
        let signal = self.confirmation.update(self.tick, now_ms, observation)?;
        if signal.just_confirmed {
            self.cue.open_confirmed();
        }

        let ctx = FrameContext {
            now_ms,
            hand: hand.as_ref(),
            open_confirmed: signal.confirmed,
            motion: &self.motion,
        };
        let detection = self.dispatcher.dispatch(&ctx);

        match detection {
            Some(detection) => {
                if let Some(follow_up) = detection.follow_up {
                    self.apply(follow_up, now_ms);
                }
                info!("Gesture detected: {}", detection.event);
                Ok(detection.event)
            }
            None if hand.is_none() => Ok(GestureEvent::NoHand),
            None => Ok(GestureEvent::NoGesture),
        }
    }

    fn apply(&mut self, follow_up: FollowUp, now_ms: u64) {
        debug!("Applying {:?}", follow_up);
        match follow_up {
            FollowUp::ClearMotionHistory => self.motion.clear(),
            FollowUp::ResetConfirmation => self.confirmation.reset(),
            FollowUp::RestartAccumulation => self.confirmation.restart_accumulation(now_ms),
        }
    }

    /// Reset all state (on user change)
    pub fn reset(&mut self) {
        self.confirmation.reset();
        self.motion.reset();
        self.dispatcher.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirmation::ConfirmationPhase;
    use crate::fixtures;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const FRAME_MS: u64 = 33;

    fn tracker() -> HandTracker {
        HandTracker::new(GestureConfig::default()).unwrap()
    }

    fn frame(hand: &HandLandmarks) -> Vec<Vec<Point>> {
        vec![hand.as_slice().to_vec()]
    }

    /// Feed `hand` from `start` until `end` (exclusive), returning detections
    fn run(
        tracker: &mut HandTracker,
        hand: &HandLandmarks,
        start: u64,
        end: u64,
    ) -> Vec<(u64, GestureEvent)> {
        (start..end)
            .step_by(FRAME_MS as usize)
            .filter_map(|t| {
                let event = tracker.process_at(&frame(hand), t).unwrap();
                event.is_detection().then_some((t, event))
            })
            .collect()
    }

    /// Hold an open palm until confirmed; returns the confirmation time
    fn confirm(tracker: &mut HandTracker, start: u64) -> u64 {
        let open = fixtures::open_palm();
        let mut t = start;
        loop {
            tracker.process_at(&frame(&open), t).unwrap();
            if matches!(tracker.confirmation().phase(), ConfirmationPhase::Confirmed { .. }) {
                return t;
            }
            t += FRAME_MS;
            assert!(t < start + 5000, "open palm never confirmed");
        }
    }

    #[test]
    fn test_no_hand_and_rejected_hand() {
        let mut tracker = tracker();
        assert_eq!(tracker.process_at(&[], 0).unwrap(), GestureEvent::NoHand);

        let short = vec![vec![Point::new(1, 1); 20]];
        assert_eq!(tracker.process_at(&short, 33).unwrap(), GestureEvent::NoHand);
        assert!(tracker.motion().is_empty());

        let open = fixtures::open_palm();
        assert_eq!(tracker.process_at(&frame(&open), 66).unwrap(), GestureEvent::NoGesture);
        assert_eq!(tracker.motion().len(), 1);
    }

    #[test]
    fn test_only_first_hand_is_used() {
        let mut tracker = tracker();
        let open = fixtures::open_palm();
        let hands = vec![vec![Point::new(0, 0); 3], open.as_slice().to_vec()];
        assert_eq!(tracker.process_at(&hands, 0).unwrap(), GestureEvent::NoHand);
    }

    #[test]
    fn test_cue_fires_once_per_confirmation() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let mut tracker = tracker().with_cue(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let confirmed_at = confirm(&mut tracker, 0);
        assert!((1000..1000 + FRAME_MS).contains(&confirmed_at));
        run(&mut tracker, &fixtures::open_palm(), confirmed_at + FRAME_MS, confirmed_at + 1400);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_open_then_fist_pauses() {
        let mut tracker = tracker();
        let confirmed_at = confirm(&mut tracker, 0);

        let fired = run(&mut tracker, &fixtures::fist(), confirmed_at + FRAME_MS, confirmed_at + 1400);
        assert_eq!(fired.len(), 1);
        let (t, event) = fired[0];
        assert_eq!(event, GestureEvent::Pause);
        assert!(t >= confirmed_at + FRAME_MS + 500);

        // Confirmation consumed by the stop gesture
        assert_eq!(tracker.confirmation().phase(), ConfirmationPhase::Idle);
    }

    #[test]
    fn test_fist_without_open_palm_does_nothing() {
        let mut tracker = tracker();
        assert!(run(&mut tracker, &fixtures::fist(), 0, 3000).is_empty());
    }

    #[test]
    fn test_moving_open_palm_delays_confirmation() {
        let mut tracker = tracker();
        let open = fixtures::open_palm();

        tracker.process_at(&frame(&open), 0).unwrap();
        tracker.process_at(&frame(&open), 600).unwrap();
        // Jump beyond the movement threshold restarts accumulation
        tracker.process_at(&frame(&open.translated(120, 0)), 700).unwrap();
        tracker.process_at(&frame(&open.translated(120, 0)), 1200).unwrap();
        assert!(matches!(
            tracker.confirmation().phase(),
            ConfirmationPhase::Accumulating { since_ms: 700 }
        ));
        tracker.process_at(&frame(&open.translated(120, 0)), 1700).unwrap();
        assert!(matches!(
            tracker.confirmation().phase(),
            ConfirmationPhase::Confirmed { until_ms: 3200 }
        ));
    }

    #[test]
    fn test_swipe_after_confirmation() {
        let mut tracker = tracker();
        let confirmed_at = confirm(&mut tracker, 0);
        let open = fixtures::open_palm();

        let mut fired = Vec::new();
        for step in 1..=12 {
            let t = confirmed_at + step as u64 * FRAME_MS;
            let event = tracker.process_at(&frame(&open.translated(step * 15, 0)), t).unwrap();
            if event.is_detection() {
                fired.push(event);
                // Trail cleared by the swipe
                assert!(tracker.motion().is_empty());
            }
        }
        assert_eq!(fired, vec![GestureEvent::Next]);
    }

    #[test]
    fn test_reserve_selection() {
        let mut tracker = tracker();
        let confirmed_at = confirm(&mut tracker, 0);

        let fired = run(&mut tracker, &fixtures::reserve(2), confirmed_at + FRAME_MS, confirmed_at + 1400);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, GestureEvent::Reserve2);
    }

    #[test]
    fn test_like_after_hold() {
        let mut tracker = tracker();
        let confirmed_at = confirm(&mut tracker, 0);
        let start = confirmed_at + FRAME_MS;

        let fired = run(&mut tracker, &fixtures::thumb_up(), start, confirmed_at + 1400);
        assert_eq!(fired.len(), 1);
        let (t, event) = fired[0];
        assert_eq!(event, GestureEvent::Like);
        assert!(t >= start + 500);
    }

    #[test]
    fn test_volume_slide() {
        let mut tracker = tracker();
        let confirmed_at = confirm(&mut tracker, 0);
        let pinch = fixtures::pinch();

        let t = confirmed_at + FRAME_MS;
        assert_eq!(tracker.process_at(&frame(&pinch), t).unwrap(), GestureEvent::NoGesture);
        let up = tracker
            .process_at(&frame(&pinch.translated(0, -30)), t + FRAME_MS)
            .unwrap();
        assert_eq!(up, GestureEvent::VolumeUp(1.5));
        let down = tracker
            .process_at(&frame(&pinch.translated(0, -10)), t + 2 * FRAME_MS)
            .unwrap();
        assert_eq!(down, GestureEvent::VolumeDown(1.0));
    }

    #[test]
    fn test_gestures_lapse_with_confirmation() {
        let mut tracker = tracker();
        let confirmed_at = confirm(&mut tracker, 0);

        // Wait out the validity window with a neutral pose
        run(&mut tracker, &fixtures::pinch(), confirmed_at + FRAME_MS, confirmed_at + 1600);
        assert!(run(&mut tracker, &fixtures::reserve(1), confirmed_at + 1600, confirmed_at + 4000).is_empty());
    }

    #[test]
    fn test_extreme_coordinates_and_timestamps() {
        let mut tracker = tracker();
        let far = fixtures::open_palm().translated(2_147_483_000, -2_147_483_000);
        let near = fixtures::open_palm().translated(-2_147_483_000, 2_147_483_000);

        assert_eq!(tracker.process_at(&frame(&far), 0).unwrap(), GestureEvent::NoGesture);
        tracker.reset();

        // Confirm close to the end of the clock
        let start = u64::MAX - 2_000;
        for i in 0..=60 {
            tracker.process_at(&frame(&far), start + i * FRAME_MS).unwrap();
        }
        assert_eq!(
            tracker.confirmation().phase(),
            ConfirmationPhase::Confirmed { until_ms: u64::MAX }
        );

        // Jumps across the whole coordinate range, all at the last instant
        let hands = [
            near,
            fixtures::fist().translated(2_147_483_000, 0),
            fixtures::pinch().translated(2_147_483_000, 0),
            fixtures::pinch().translated(-2_147_483_000, 0),
            fixtures::open_palm().translated(i32::MAX, i32::MIN),
            fixtures::open_palm().translated(i32::MIN, i32::MAX),
        ];
        for hand in &hands {
            let event = tracker.process_at(&frame(hand), u64::MAX).unwrap();
            assert_ne!(event, GestureEvent::NoHand);
        }
        assert!(tracker.motion().displacement().is_some());
    }

    #[test]
    fn test_reset() {
        let mut tracker = tracker();
        confirm(&mut tracker, 0);
        tracker.reset();
        assert_eq!(tracker.confirmation().phase(), ConfirmationPhase::Idle);
        assert!(tracker.motion().is_empty());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GestureConfig {
            like_history_len: 0,
            ..Default::default()
        };
        assert!(matches!(HandTracker::new(config), Err(GestureError::Config(_))));
    }
}
