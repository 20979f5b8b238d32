//! Game state machine
//!
//! Idle --start--> Playing --crash--> Over --start--> Playing
//!
//! `Game` owns the only `GameState`. It never talks to the page directly:
//! everything the outside world needs to hear about is queued as a
//! `GameEvent` for the frame loop to dispatch.

use rand_pcg::Pcg32;

use crate::error::ConfigError;
use crate::highscores::HighScore;
use crate::sim::{Crash, GamePhase, GameState, GapSource, apply_impulse, tick};
use crate::tuning::Tuning;

/// Notifications for the display and persistence collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A run began; score is back to 0
    Started,
    /// Score changed mid-run
    Scored { score: u32 },
    /// The finished run beat the stored best
    NewHighScore { score: u32 },
    /// The run ended
    GameOver { crash: Crash, score: u32 },
}

pub struct Game<G: GapSource = Pcg32> {
    state: GameState,
    tuning: Tuning,
    gaps: G,
    events: Vec<GameEvent>,
}

impl<G: GapSource> Game<G> {
    /// Validate tuning and start idle
    pub fn new(tuning: Tuning, gaps: G, high_score: HighScore) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::new(&tuning, high_score),
            tuning,
            gaps,
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_playing(&self) -> bool {
        self.state.phase == GamePhase::Playing
    }

    /// Start signal. Accepted from Idle or Over; returns false while Playing.
    pub fn start(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        self.state.reset_run(&self.tuning);
        self.state.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Run started (best so far: {})", self.state.high_score.best());
        true
    }

    /// Flap. Ignored unless Playing.
    pub fn impulse(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        apply_impulse(&mut self.state.bird, self.tuning.jump_impulse);
        true
    }

    /// Run one tick. Returns true while the run continues.
    pub fn update(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }

        let report = tick(&mut self.state, &self.tuning, &mut self.gaps);
        if report.scored > 0 {
            self.events.push(GameEvent::Scored {
                score: self.state.score,
            });
        }

        match report.crash {
            Some(crash) => {
                self.game_over(crash);
                false
            }
            None => true,
        }
    }

    fn game_over(&mut self, crash: Crash) {
        let score = self.state.score;
        self.state.phase = GamePhase::Over;

        if self.state.high_score.record(score) {
            log::info!("New high score: {}", score);
            self.events.push(GameEvent::NewHighScore { score });
        }
        log::info!(
            "Game over after {} ticks: {:?}, score {}",
            self.state.time_ticks,
            crash,
            score
        );
        self.events.push(GameEvent::GameOver { crash, score });
    }

    /// Take queued events in the order they happened
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Mutable state access for scripted setups
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
