//! The session object: owns the tracker, the pursuit simulation and the
//! pursuit timer, and is the only place game state changes.

use tracing::{debug, info, trace};

use crate::clock::Clock;
use crate::corpus::TextSource;
use crate::error::{GameError, Result};
use crate::pursuit::{Progress, PursuitSimulator, PursuitState, TickOutcome, TICK_INTERVAL};
use crate::timer::RepeatingTask;
use crate::tracker::{Statistics, Tracker};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GameState {
    Start,
    Rules,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn can_transition_to(self, next: GameState) -> bool {
        use GameState::*;
        matches!(
            (self, next),
            (Start, Rules)
                | (Start, Playing)
                | (Rules, Playing)
                | (Rules, Start)
                | (Playing, Won)
                | (Playing, Lost)
                | (Playing, Start)
                | (Won, Start)
                | (Won, Playing)
                | (Lost, Start)
                | (Lost, Playing)
        )
    }
}

/// Read-only snapshot handed to the presentation layer
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub target_text: String,
    pub typed_input: String,
    pub statistics: Statistics,
    pub pursuer_position: f64,
    pub pursued_position: f64,
    pub game_state: GameState,
}

impl DisplayState {
    pub fn is_correct_prefix(&self) -> bool {
        self.target_text.starts_with(&self.typed_input)
    }
}

pub struct Game<S: TextSource, C: Clock> {
    state: GameState,
    tracker: Tracker,
    pursuit: PursuitSimulator,
    timer: RepeatingTask,
    corpus: S,
    clock: C,
    generation: u64,
    final_stats: Option<Statistics>,
}

impl<S: TextSource, C: Clock> Game<S, C> {
    pub fn new(corpus: S, clock: C) -> Self {
        let tracker = Tracker::begin("", clock.now());
        Self {
            state: GameState::Start,
            tracker,
            pursuit: PursuitSimulator::new(),
            timer: RepeatingTask::new(TICK_INTERVAL),
            corpus,
            clock,
            generation: 0,
            final_stats: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn pursuit_state(&self) -> PursuitState {
        self.pursuit.state()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_running()
    }

    pub fn typed_input(&self) -> String {
        self.tracker.typed_input()
    }

    fn transition(&mut self, next: GameState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(GameError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        info!(from = %self.state, to = %next, "game state change");
        self.state = next;
        Ok(())
    }

    /// Begins a new session with a fresh text. Also serves as replay.
    pub fn start_session(&mut self) -> Result<()> {
        self.transition(GameState::Playing)?;

        let now = self.clock.now();
        let text = self.corpus.next_text();
        self.generation += 1;
        self.tracker = Tracker::begin(&text, now);
        self.pursuit.reset();
        self.final_stats = None;
        self.timer.start(self.generation, now);

        info!(
            generation = self.generation,
            chars = self.tracker.target_len(),
            "session started"
        );
        Ok(())
    }

    pub fn show_rules(&mut self) -> Result<()> {
        self.transition(GameState::Rules)
    }

    /// Full-buffer input update. Ignored outside play; completing the text
    /// wins immediately without waiting for the next tick.
    pub fn submit_input(&mut self, text: &str) -> Result<()> {
        if self.state != GameState::Playing {
            trace!(state = %self.state, "input outside play ignored");
            return Ok(());
        }
        if self.tracker.apply_input(text) && self.tracker.is_complete() {
            debug!("text completed on input");
            self.finish(GameState::Won)?;
        }
        Ok(())
    }

    /// Runs the pursuit tick if the timer is due.
    pub fn poll(&mut self) -> Result<()> {
        let now = self.clock.now();
        if self.timer.poll(self.generation, now) {
            self.on_tick()?;
        }
        Ok(())
    }

    pub fn on_tick(&mut self) -> Result<()> {
        if self.state != GameState::Playing {
            trace!(state = %self.state, "tick outside play ignored");
            return Ok(());
        }

        let stats = self.tracker.compute_statistics(self.clock.now());
        let outcome = self.pursuit.tick(Progress {
            elapsed_secs: stats.elapsed_secs,
            typed: stats.characters_typed,
            target_len: self.tracker.target_len(),
            complete: self.tracker.is_complete(),
        });

        match outcome {
            TickOutcome::Captured => self.finish(GameState::Lost),
            TickOutcome::Escaped => self.finish(GameState::Won),
            TickOutcome::Continue => Ok(()),
        }
    }

    fn finish(&mut self, outcome: GameState) -> Result<()> {
        self.timer.cancel();
        let stats = self.tracker.compute_statistics(self.clock.now());
        self.transition(outcome)?;
        info!(%outcome, %stats, "session over");
        self.final_stats = Some(stats);
        Ok(())
    }

    /// Halts the pursuit timer and returns to the menu.
    pub fn reset_to_menu(&mut self) -> Result<()> {
        self.timer.cancel();
        if self.state == GameState::Start {
            return Ok(());
        }
        self.transition(GameState::Start)
    }

    pub fn display_state(&self) -> DisplayState {
        let statistics = match self.state {
            GameState::Playing => self.tracker.compute_statistics(self.clock.now()),
            GameState::Won | GameState::Lost => self.final_stats.unwrap_or_default(),
            GameState::Start | GameState::Rules => Statistics::default(),
        };
        let pursuit = self.pursuit.state();

        DisplayState {
            target_text: self.tracker.target_text(),
            typed_input: self.tracker.typed_input(),
            statistics,
            pursuer_position: pursuit.pursuer,
            pursued_position: pursuit.pursued,
            game_state: self.state,
        }
    }
}
