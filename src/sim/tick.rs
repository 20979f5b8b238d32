//! Fixed timestep simulation tick
//!
//! One call advances the run by exactly one display frame.

use super::geometry::{Crash, field_contact};
use super::obstacles::{advance, spawn_if_due};
use super::physics::integrate;
use super::rng::GapSource;
use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Obstacles passed this tick
    pub scored: u32,
    /// Set when the run must end
    pub crash: Option<Crash>,
}

/// Advance the game state by one tick.
///
/// Order: physics, field bounds, spawn, then obstacles (move, collide,
/// score, recycle). Bounds are checked after the move with no sub-stepping,
/// so the bird may overlap an edge by one tick of motion before the crash
/// registers. Does nothing outside Playing; the phase change itself belongs
/// to the state machine.
pub fn tick(state: &mut GameState, tuning: &Tuning, gaps: &mut impl GapSource) -> TickReport {
    if state.phase != GamePhase::Playing {
        return TickReport::default();
    }

    state.time_ticks += 1;
    integrate(&mut state.bird, tuning.gravity);

    if let Some(crash) = field_contact(&state.bird.bounds(), tuning.field_height) {
        return TickReport {
            scored: 0,
            crash: Some(crash),
        };
    }

    spawn_if_due(state, tuning, gaps);

    let result = advance(state, tuning);
    TickReport {
        scored: result.scored,
        crash: result.crash,
    }
}
