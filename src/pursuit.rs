//! Shark-and-fish pursuit along a one-dimensional track.
//!
//! The fish (pursued) tracks typing progress. The shark (pursuer) only moves
//! when the player falls behind a fixed pace, one step per tick.

use std::time::Duration;

use tracing::debug;

/// How often the pursuit advances
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);
/// Pace a perfect player is assumed to hold
pub const EXPECTED_CHARS_PER_SECOND: f64 = 3.0;
/// Characters behind pace before the shark moves
pub const LAG_THRESHOLD: i64 = 3;
pub const PURSUER_STEP: f64 = 7.0;
/// Closest the shark may get to the fish in a single step
pub const OVERSHOOT_GAP: f64 = 20.0;
pub const CAPTURE_MARGIN: f64 = 30.0;
pub const PURSUED_START: f64 = 100.0;
pub const PURSUER_START: f64 = 50.0;
pub const TRACK_LENGTH: f64 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PursuitState {
    pub pursued: f64,
    pub pursuer: f64,
}

impl Default for PursuitState {
    fn default() -> Self {
        Self {
            pursued: PURSUED_START,
            pursuer: PURSUER_START,
        }
    }
}

impl PursuitState {
    pub fn is_captured(&self) -> bool {
        self.pursuer >= self.pursued - CAPTURE_MARGIN
    }
}

/// Result of a single pursuit tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Captured,
    Escaped,
}

/// Typing progress sampled at tick time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub elapsed_secs: f64,
    pub typed: usize,
    pub target_len: usize,
    pub complete: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PursuitSimulator {
    state: PursuitState,
}

impl PursuitSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PursuitState) -> Self {
        Self { state }
    }

    pub fn reset(&mut self) {
        self.state = PursuitState::default();
    }

    pub fn state(&self) -> PursuitState {
        self.state
    }

    pub fn expected_progress(&self, elapsed_secs: f64) -> i64 {
        (elapsed_secs * EXPECTED_CHARS_PER_SECOND).floor() as i64
    }

    pub fn tick(&mut self, progress: Progress) -> TickOutcome {
        let lag = self.expected_progress(progress.elapsed_secs) - progress.typed as i64;

        // Clamp against the fish position from the previous tick.
        if lag >= LAG_THRESHOLD {
            let limit = self.state.pursued - OVERSHOOT_GAP;
            self.state.pursuer = (self.state.pursuer + PURSUER_STEP).min(limit);
        }

        let fraction = if progress.target_len > 0 {
            progress.typed as f64 / progress.target_len as f64
        } else {
            0.0
        };
        self.state.pursued = PURSUED_START + fraction * TRACK_LENGTH;

        let outcome = self.evaluate(progress);
        debug!(
            lag,
            pursuer = self.state.pursuer,
            pursued = self.state.pursued,
            ?outcome,
            "pursuit tick"
        );
        outcome
    }

    /// Capture is checked before completion.
    pub fn evaluate(&self, progress: Progress) -> TickOutcome {
        if self.state.is_captured() {
            TickOutcome::Captured
        } else if progress.typed >= progress.target_len && progress.complete {
            TickOutcome::Escaped
        } else {
            TickOutcome::Continue
        }
    }
}
