//! Open-palm confirmation state machine
//!
//! Converts per-frame "is the palm open now" observations into a debounced
//! "was confidently open recently" signal. The palm must stay open for
//! `open_duration_ms`; the confirmation then holds for
//! `validity_duration_ms` regardless of what the hand does next, which is
//! the window in which dependent gestures (fist, swipe, pinch, ...) are
//! accepted.
//!
//! ```text
//!   Idle ──open──▶ Accumulating(since) ──open ≥ open_duration──▶ Confirmed(until)
//!    ▲                 │ not open / no hand                          │ now > until
//!    └─────────────────┴─────────────────────────────────────────────┘
//! ```
//!
//! [`OpenConfirmation::update`] advances timers and must run exactly once
//! per frame; a second call with the same [`FrameTick`] is rejected.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{GestureConfig, GestureError};

/// Identifies one processed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct FrameTick(pub u64);

impl FrameTick {
    pub fn next(self) -> Self {
        FrameTick(self.0.wrapping_add(1))
    }
}

/// Palm state observed in the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PalmObservation {
    NoHand,
    Open,
    NotOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfirmationPhase {
    #[default]
    Idle,
    Accumulating { since_ms: u64 },
    Confirmed { until_ms: u64 },
}

/// Output of one confirmation update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenSignal {
    /// Open palm confirmed and still valid
    pub confirmed: bool,
    /// Confirmation happened on this frame
    pub just_confirmed: bool,
}

#[derive(Debug, Clone)]
pub struct OpenConfirmation {
    phase: ConfirmationPhase,
    open_duration_ms: u64,
    validity_duration_ms: u64,
    last_tick: Option<FrameTick>,
}

impl OpenConfirmation {
    pub fn new(config: &GestureConfig) -> Self {
        Self::with_durations(config.open_duration_ms, config.validity_duration_ms)
    }

    pub fn with_durations(open_duration_ms: u64, validity_duration_ms: u64) -> Self {
        Self {
            phase: ConfirmationPhase::Idle,
            open_duration_ms,
            validity_duration_ms,
            last_tick: None,
        }
    }

    pub fn phase(&self) -> ConfirmationPhase {
        self.phase
    }

    /// Advance the state machine for one frame
    pub fn update(
        &mut self,
        tick: FrameTick,
        now_ms: u64,
        observation: PalmObservation,
    ) -> Result<OpenSignal, GestureError> {
        if self.last_tick == Some(tick) {
            return Err(GestureError::ConfirmationReentered { frame: tick.0 });
        }
        self.last_tick = Some(tick);

        if let ConfirmationPhase::Confirmed { until_ms } = self.phase {
            if now_ms <= until_ms {
                return Ok(OpenSignal {
                    confirmed: true,
                    just_confirmed: false,
                });
            }
            debug!("Open-palm confirmation expired at {}ms", until_ms);
            self.phase = ConfirmationPhase::Idle;
        }

        match (observation, self.phase) {
            (PalmObservation::Open, ConfirmationPhase::Idle) => {
                self.phase = ConfirmationPhase::Accumulating { since_ms: now_ms };
                Ok(OpenSignal::default())
            }
            (PalmObservation::Open, ConfirmationPhase::Accumulating { since_ms })
                if now_ms.saturating_sub(since_ms) >= self.open_duration_ms =>
            {
                let until_ms = now_ms.saturating_add(self.validity_duration_ms);
                info!(
                    "Open palm confirmed after {}ms, valid until {}ms",
                    now_ms.saturating_sub(since_ms),
                    until_ms
                );
                self.phase = ConfirmationPhase::Confirmed { until_ms };
                Ok(OpenSignal {
                    confirmed: true,
                    just_confirmed: true,
                })
            }
            (PalmObservation::Open, _) => Ok(OpenSignal::default()),
            (PalmObservation::NoHand | PalmObservation::NotOpen, _) => {
                self.phase = ConfirmationPhase::Idle;
                Ok(OpenSignal::default())
            }
        }
    }

    /// Restart open-time accumulation from `now_ms`, e.g. after the palm
    /// moved too far to count as continuously held. No effect while a
    /// confirmation is active.
    pub fn restart_accumulation(&mut self, now_ms: u64) {
        if !matches!(self.phase, ConfirmationPhase::Confirmed { .. }) {
            debug!("Open-palm accumulation restarted at {}ms", now_ms);
            self.phase = ConfirmationPhase::Accumulating { since_ms: now_ms };
        }
    }

    /// Drop any accumulation or confirmation
    pub fn reset(&mut self) {
        self.phase = ConfirmationPhase::Idle;
    }
}
