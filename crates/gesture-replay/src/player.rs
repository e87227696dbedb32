//! Media player that logs instead of playing

use gesture_core::Rating;
use media_control::{MediaPlayer, PlayerError};
use tracing::info;

#[derive(Debug, Clone)]
pub struct LoggingPlayer {
    playing: bool,
    /// 0.0..=100.0
    volume: f64,
    track: i64,
}

impl LoggingPlayer {
    pub fn new() -> Self {
        Self {
            playing: false,
            volume: 50.0,
            track: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn track(&self) -> i64 {
        self.track
    }
}

impl Default for LoggingPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPlayer for LoggingPlayer {
    fn play(&mut self) -> Result<(), PlayerError> {
        self.playing = true;
        info!("Player: play");
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.playing = false;
        info!("Player: pause");
        Ok(())
    }

    fn next(&mut self) -> Result<(), PlayerError> {
        self.track += 1;
        info!("Player: next track ({})", self.track);
        Ok(())
    }

    fn previous(&mut self) -> Result<(), PlayerError> {
        self.track -= 1;
        info!("Player: previous track ({})", self.track);
        Ok(())
    }

    fn adjust_volume(&mut self, delta: f64) -> Result<(), PlayerError> {
        self.volume = (self.volume + delta).clamp(0.0, 100.0);
        info!("Player: volume {:+.2} -> {:.2}", delta, self.volume);
        Ok(())
    }

    fn select(&mut self, slot: u8) -> Result<(), PlayerError> {
        info!("Player: select reserve {}", slot);
        Ok(())
    }

    fn rate(&mut self, rating: Rating) -> Result<(), PlayerError> {
        info!("Player: rate {:?}", rating);
        Ok(())
    }
}
