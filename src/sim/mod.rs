//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Injected gap source only
//! - Stable iteration order (obstacles kept in spawn order)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod obstacles;
pub mod physics;
pub mod rng;
pub mod state;
pub mod tick;

pub use geometry::{
    Aabb, Crash, barrier_rects, collides_with_obstacle, field_contact, obstacle_contact,
    out_of_field, rect_overlap,
};
pub use obstacles::{Advance, advance, spawn_if_due};
pub use physics::{apply_impulse, integrate, tilt};
pub use rng::{GapSource, ScriptedGaps, seeded};
pub use state::{Bird, GamePhase, GameState, Obstacle};
pub use tick::{TickReport, tick};
