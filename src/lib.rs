//! Gapwing - a one-button gap-threading arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions)
//! - `game`: Start/playing/over state machine and score bookkeeping
//! - `frame_loop`: Display-synchronized scheduling of update + draw
//! - `renderer`: Draw command generation and the WebGPU pipeline
//! - `tuning`: Data-driven gameplay constants

pub mod error;
pub mod frame_loop;
pub mod game;
pub mod highscores;
pub mod hud;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, RenderError};
pub use frame_loop::{FrameScheduler, GameLoop, ManualScheduler};
pub use game::{Game, GameEvent};
pub use highscores::{HighScore, MemoryStore, ScoreStore};
pub use hud::{Hud, LogHud};
pub use tuning::Tuning;

/// Default gameplay constants (all motion is per tick, not per second)
pub mod consts {
    /// Play-field dimensions in pixels
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Bird defaults - x is fixed, y starts mid-field
    pub const BIRD_X: f32 = 50.0;
    pub const BIRD_START_Y: f32 = FIELD_HEIGHT / 2.0;
    pub const BIRD_WIDTH: f32 = 40.0;
    pub const BIRD_HEIGHT: f32 = 30.0;

    /// Velocity added every tick
    pub const GRAVITY: f32 = 0.3;
    /// Velocity set (not added) on a flap
    pub const JUMP_IMPULSE: f32 = -6.0;
    /// Tilt radians per unit of velocity (presentation only)
    pub const TILT_FACTOR: f32 = 0.1;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_SPEED: f32 = 1.5;
    pub const GAP_SIZE: f32 = 150.0;
    /// Ticks between spawns (a spawn happens once the timer exceeds this)
    pub const SPAWN_INTERVAL: u32 = 150;
    /// Minimum distance from the field edge to the gap
    pub const MIN_MARGIN: f32 = 50.0;
}
