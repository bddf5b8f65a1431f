use std::fmt::{self, Display, Formatter};
use std::time::{Duration, Instant};

use tracing::trace;

/// Standard: 5 characters = 1 word
const CHARS_PER_WORD: f64 = 5.0;

/// Live numbers derived from a session; recomputed, never mutated
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Statistics {
    pub elapsed_secs: f64,
    pub characters_typed: usize,
    pub errors: usize,
    pub wpm: u32,
    pub accuracy: u32,
    pub progress: f64,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            elapsed_secs: 0.0,
            characters_typed: 0,
            errors: 0,
            wpm: 0,
            accuracy: 100,
            progress: 0.0,
        }
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} wpm | {}% acc | {}s | {} chars | {} errors",
            self.wpm,
            self.accuracy,
            self.elapsed_secs.round(),
            self.characters_typed,
            self.errors
        )
    }
}

/// Target text, the player's current input and when the session began
#[derive(Clone, Debug)]
pub struct Tracker {
    target: Vec<char>,
    typed: Vec<char>,
    started_at: Instant,
}

impl Tracker {
    pub fn begin(text: &str, now: Instant) -> Self {
        Self {
            target: text.chars().collect(),
            typed: Vec::new(),
            started_at: now,
        }
    }

    /// Replaces the typed input wholesale. Candidates longer than the target
    /// are dropped without touching state; returns whether it was applied.
    pub fn apply_input(&mut self, candidate: &str) -> bool {
        let candidate: Vec<char> = candidate.chars().collect();
        if candidate.len() > self.target.len() {
            trace!(
                len = candidate.len(),
                max = self.target.len(),
                "ignoring overtyped input"
            );
            return false;
        }
        self.typed = candidate;
        true
    }

    pub fn compute_statistics(&self, now: Instant) -> Statistics {
        self.statistics_after(now.saturating_duration_since(self.started_at))
    }

    pub fn statistics_after(&self, elapsed: Duration) -> Statistics {
        let elapsed_secs = elapsed.as_secs_f64();
        let characters_typed = self.typed.len();
        let errors = self.error_count();

        let wpm = if elapsed_secs > 0.0 {
            ((characters_typed as f64 / CHARS_PER_WORD) / elapsed_secs * 60.0).round() as u32
        } else {
            0
        };

        let accuracy = if characters_typed > 0 {
            (((characters_typed - errors) as f64 / characters_typed as f64) * 100.0).round() as u32
        } else {
            100
        };

        Statistics {
            elapsed_secs,
            characters_typed,
            errors,
            wpm,
            accuracy,
            progress: self.progress() * 100.0,
        }
    }

    /// Mismatches within the typed span only
    pub fn error_count(&self) -> usize {
        self.typed
            .iter()
            .zip(self.target.iter())
            .filter(|(typed, expected)| typed != expected)
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.typed == self.target
    }

    pub fn is_correct_prefix(&self) -> bool {
        self.target.starts_with(&self.typed)
    }

    /// Completion fraction in [0, 1]; 0 for an empty target
    pub fn progress(&self) -> f64 {
        if self.target.is_empty() {
            0.0
        } else {
            self.typed.len() as f64 / self.target.len() as f64
        }
    }

    pub fn typed_len(&self) -> usize {
        self.typed.len()
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    pub fn typed_input(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}
