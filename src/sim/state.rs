//! Game state and core simulation types
//!
//! Everything a run needs lives here; no globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::highscores::HighScore;
use crate::tuning::Tuning;

use super::geometry::Aabb;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start signal
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a restart
    Over,
}

/// The player-controlled bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Centre of the body (x never changes)
    pub pos: Vec2,
    /// Vertical velocity, pixels per tick (positive is down)
    pub vel: f32,
    pub width: f32,
    pub height: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_x, tuning.bird_start_y),
            vel: 0.0,
            width: tuning.bird_width,
            height: tuning.bird_height,
        }
    }

    /// Collision rectangle
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(self.width, self.height))
    }
}

/// A pair of barriers with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the upper barrier
    pub gap_top: f32,
    pub width: f32,
    pub gap_size: f32,
    /// Score already credited for this obstacle
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32, tuning: &Tuning) -> Self {
        Self {
            x,
            gap_top,
            width: tuning.obstacle_width,
            gap_size: tuning.gap_size,
            passed: false,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_size
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Obstacles passed this run
    pub score: u32,
    /// Best score across runs
    pub high_score: HighScore,
    pub bird: Bird,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    /// Ticks simulated this run
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh idle state
    pub fn new(tuning: &Tuning, high_score: HighScore) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            high_score,
            bird: Bird::new(tuning),
            obstacles: Vec::new(),
            spawn_timer: 0,
            time_ticks: 0,
        }
    }

    /// Put everything back to the start-of-run layout, keeping the high score
    pub fn reset_run(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.bird = Bird::new(tuning);
        self.obstacles.clear();
        self.spawn_timer = 0;
        self.time_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_bounds_centered() {
        let bird = Bird::new(&Tuning::default());
        let b = bird.bounds();
        assert_eq!(b.min, Vec2::new(30.0, 285.0));
        assert_eq!(b.max, Vec2::new(70.0, 315.0));
    }

    #[test]
    fn test_reset_run_keeps_high_score() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, HighScore::new(7));
        state.score = 3;
        state.bird.pos.y = 10.0;
        state.bird.vel = 4.0;
        state.obstacles.push(Obstacle::new(100.0, 200.0, &tuning));
        state.spawn_timer = 42;

        state.reset_run(&tuning);

        assert_eq!(state.score, 0);
        assert_eq!(state.bird, Bird::new(&tuning));
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawn_timer, 0);
        assert_eq!(state.high_score.best(), 7);
    }
}
