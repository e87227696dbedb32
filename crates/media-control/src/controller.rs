//! Gesture Controller Implementation

use gesture_core::{GestureEvent, Rating};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Player-side failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayerError {
    #[error("Player unavailable: {0}")]
    Unavailable(String),

    #[error("Command rejected: {0}")]
    Rejected(String),
}

/// Command issued to the media player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MediaCommand {
    Play,
    Pause,
    Next,
    Previous,
    /// Additive volume change, positive is louder
    AdjustVolume(f64),
    /// Reserve slot 1..=3
    Select(u8),
    Rate(Rating),
}

impl MediaCommand {
    /// Map a gesture event to a command. Non-detections map to nothing.
    pub fn from_event(event: GestureEvent) -> Option<Self> {
        match event {
            GestureEvent::Play => Some(MediaCommand::Play),
            GestureEvent::Pause => Some(MediaCommand::Pause),
            GestureEvent::Next => Some(MediaCommand::Next),
            GestureEvent::Previous => Some(MediaCommand::Previous),
            GestureEvent::VolumeUp(delta) => Some(MediaCommand::AdjustVolume(delta)),
            GestureEvent::VolumeDown(delta) => Some(MediaCommand::AdjustVolume(-delta)),
            GestureEvent::Reserve1 => Some(MediaCommand::Select(1)),
            GestureEvent::Reserve2 => Some(MediaCommand::Select(2)),
            GestureEvent::Reserve3 => Some(MediaCommand::Select(3)),
            GestureEvent::Like => Some(MediaCommand::Rate(Rating::Like)),
            GestureEvent::Dislike => Some(MediaCommand::Rate(Rating::Dislike)),
            GestureEvent::Unknown | GestureEvent::NoHand | GestureEvent::NoGesture => None,
        }
    }

    /// Volume adjustments stream every frame and are never de-duplicated
    pub fn is_continuous(&self) -> bool {
        matches!(self, MediaCommand::AdjustVolume(_))
    }
}

/// Media player driven by the controller
pub trait MediaPlayer {
    fn play(&mut self) -> Result<(), PlayerError>;
    fn pause(&mut self) -> Result<(), PlayerError>;
    fn next(&mut self) -> Result<(), PlayerError>;
    fn previous(&mut self) -> Result<(), PlayerError>;
    fn adjust_volume(&mut self, delta: f64) -> Result<(), PlayerError>;
    fn select(&mut self, slot: u8) -> Result<(), PlayerError>;
    fn rate(&mut self, rating: Rating) -> Result<(), PlayerError>;
}

/// Controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Identical discrete commands must be strictly more than this apart (ms)
    pub cooldown_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self { cooldown_ms: 2500 }
    }
}

/// Forwards gesture events to a player with repeat suppression
pub struct GestureController<P: MediaPlayer> {
    config: ControllerConfig,
    player: P,
    /// Last discrete command sent and when
    last: Option<(MediaCommand, u64)>,
    forwarded: usize,
    suppressed: usize,
}

impl<P: MediaPlayer> GestureController<P> {
    pub fn new(config: ControllerConfig, player: P) -> Self {
        info!("Creating gesture controller with config: {:?}", config);
        Self {
            config,
            player,
            last: None,
            forwarded: 0,
            suppressed: 0,
        }
    }

    /// Handle one gesture event. Returns the command sent to the player,
    /// or `None` when the event maps to nothing or was suppressed.
    pub fn handle(
        &mut self,
        event: GestureEvent,
        now_ms: u64,
    ) -> Result<Option<MediaCommand>, PlayerError> {
        let Some(command) = MediaCommand::from_event(event) else {
            return Ok(None);
        };

        if !command.is_continuous() {
            if let Some((last, at)) = self.last {
                if last == command && now_ms.saturating_sub(at) <= self.config.cooldown_ms {
                    debug!("{:?} suppressed: repeated within {}ms", command, self.config.cooldown_ms);
                    self.suppressed += 1;
                    return Ok(None);
                }
            }
            self.last = Some((command, now_ms));
        }

        self.execute(command)?;
        self.forwarded += 1;
        Ok(Some(command))
    }

    fn execute(&mut self, command: MediaCommand) -> Result<(), PlayerError> {
        match command {
            MediaCommand::Play => self.player.play(),
            MediaCommand::Pause => self.player.pause(),
            MediaCommand::Next => self.player.next(),
            MediaCommand::Previous => self.player.previous(),
            MediaCommand::AdjustVolume(delta) => self.player.adjust_volume(delta),
            MediaCommand::Select(slot) => self.player.select(slot),
            MediaCommand::Rate(rating) => self.player.rate(rating),
        }
    }

    /// Commands sent to the player
    pub fn forwarded(&self) -> usize {
        self.forwarded
    }

    /// Repeats dropped by the cooldown
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn into_player(self) -> P {
        self.player
    }

    /// Forget the last command (new session)
    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        commands: Vec<MediaCommand>,
        volume: f64,
        fail: bool,
    }

    impl Recorder {
        fn push(&mut self, command: MediaCommand) -> Result<(), PlayerError> {
            if self.fail {
                return Err(PlayerError::Unavailable("offline".into()));
            }
            self.commands.push(command);
            Ok(())
        }
    }

    impl MediaPlayer for Recorder {
        fn play(&mut self) -> Result<(), PlayerError> {
            self.push(MediaCommand::Play)
        }
        fn pause(&mut self) -> Result<(), PlayerError> {
            self.push(MediaCommand::Pause)
        }
        fn next(&mut self) -> Result<(), PlayerError> {
            self.push(MediaCommand::Next)
        }
        fn previous(&mut self) -> Result<(), PlayerError> {
            self.push(MediaCommand::Previous)
        }
        fn adjust_volume(&mut self, delta: f64) -> Result<(), PlayerError> {
            self.volume += delta;
            self.push(MediaCommand::AdjustVolume(delta))
        }
        fn select(&mut self, slot: u8) -> Result<(), PlayerError> {
            self.push(MediaCommand::Select(slot))
        }
        fn rate(&mut self, rating: Rating) -> Result<(), PlayerError> {
            self.push(MediaCommand::Rate(rating))
        }
    }

    fn controller() -> GestureController<Recorder> {
        GestureController::new(ControllerConfig::default(), Recorder::default())
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(MediaCommand::from_event(GestureEvent::Pause), Some(MediaCommand::Pause));
        assert_eq!(MediaCommand::from_event(GestureEvent::Reserve3), Some(MediaCommand::Select(3)));
        assert_eq!(
            MediaCommand::from_event(GestureEvent::Dislike),
            Some(MediaCommand::Rate(Rating::Dislike))
        );
        assert_eq!(
            MediaCommand::from_event(GestureEvent::VolumeDown(0.5)),
            Some(MediaCommand::AdjustVolume(-0.5))
        );
        assert_eq!(MediaCommand::from_event(GestureEvent::NoGesture), None);
        assert_eq!(MediaCommand::from_event(GestureEvent::Unknown), None);
    }

    #[test]
    fn test_repeat_suppressed_within_cooldown() {
        let mut controller = controller();

        assert_eq!(controller.handle(GestureEvent::Next, 0).unwrap(), Some(MediaCommand::Next));
        assert_eq!(controller.handle(GestureEvent::Next, 2499).unwrap(), None);
        // Exactly one cooldown later is still a repeat
        assert_eq!(controller.handle(GestureEvent::Next, 2500).unwrap(), None);
        assert_eq!(controller.handle(GestureEvent::Next, 2501).unwrap(), Some(MediaCommand::Next));

        assert_eq!(controller.forwarded(), 2);
        assert_eq!(controller.suppressed(), 2);
    }

    #[test]
    fn test_different_command_passes() {
        let mut controller = controller();

        controller.handle(GestureEvent::Next, 0).unwrap();
        assert!(controller.handle(GestureEvent::Previous, 100).unwrap().is_some());
        // Last command is now Previous, so Next passes again
        assert!(controller.handle(GestureEvent::Next, 200).unwrap().is_some());
        assert_eq!(
            controller.player().commands,
            vec![MediaCommand::Next, MediaCommand::Previous, MediaCommand::Next]
        );
    }

    #[test]
    fn test_volume_is_never_suppressed() {
        let mut controller = controller();

        controller.handle(GestureEvent::Pause, 0).unwrap();
        for t in 1..5 {
            controller.handle(GestureEvent::VolumeUp(0.5), t * 33).unwrap();
        }
        controller.handle(GestureEvent::VolumeDown(1.0), 200).unwrap();
        // Volume does not reset the discrete cooldown
        assert_eq!(controller.handle(GestureEvent::Pause, 300).unwrap(), None);

        let player = controller.into_player();
        assert!((player.volume - 1.0).abs() < 1e-9);
        assert_eq!(player.commands.len(), 6);
    }

    #[test]
    fn test_player_error_propagates() {
        let mut controller = GestureController::new(
            ControllerConfig::default(),
            Recorder {
                fail: true,
                ..Default::default()
            },
        );

        let err = controller.handle(GestureEvent::Play, 0).unwrap_err();
        assert_eq!(err, PlayerError::Unavailable("offline".into()));
        assert_eq!(controller.forwarded(), 0);
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: ControllerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.cooldown_ms, 2500);
    }
}
