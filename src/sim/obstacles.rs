//! Obstacle lifecycle: spawn, advance, score, recycle

use super::geometry::{Crash, obstacle_contact};
use super::rng::GapSource;
use super::state::{GameState, Obstacle};
use crate::tuning::Tuning;

/// Outcome of moving the obstacles one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    /// Obstacles passed this tick
    pub scored: u32,
    /// Set when the bird hit a barrier; the traversal stops there
    pub crash: Option<Crash>,
}

/// Count a tick; spawn at the right edge once the timer exceeds the interval
pub fn spawn_if_due(state: &mut GameState, tuning: &Tuning, gaps: &mut impl GapSource) -> bool {
    state.spawn_timer += 1;
    if state.spawn_timer <= tuning.spawn_interval {
        return false;
    }

    let (min, max) = tuning.gap_top_range();
    let gap_top = gaps.next_gap_top(min, max) as f32;
    state
        .obstacles
        .push(Obstacle::new(tuning.field_width, gap_top, tuning));
    state.spawn_timer = 0;

    log::debug!(
        "Spawned obstacle at tick {} with gap_top={} ({} live)",
        state.time_ticks,
        gap_top,
        state.obstacles.len()
    );
    true
}

/// Move every obstacle left, checking collision before scoring and removal.
///
/// Walks newest to oldest so removal by index is safe. A departing obstacle
/// is still checked on the tick it is removed.
pub fn advance(state: &mut GameState, tuning: &Tuning) -> Advance {
    let mut result = Advance::default();
    let bird_box = state.bird.bounds();
    let bird_x = state.bird.pos.x;

    for i in (0..state.obstacles.len()).rev() {
        let obstacle = &mut state.obstacles[i];
        obstacle.x -= tuning.obstacle_speed;

        if let Some(crash) = obstacle_contact(&bird_box, obstacle, tuning.field_height) {
            result.crash = Some(crash);
            return result;
        }

        if !obstacle.passed && obstacle.right() < bird_x {
            obstacle.passed = true;
            state.score += 1;
            result.scored += 1;
            log::debug!("Passed obstacle, score={}", state.score);
        }

        if obstacle.right() < 0.0 {
            state.obstacles.remove(i);
        }
    }

    result
}
