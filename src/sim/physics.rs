//! Bird motion
//!
//! Fixed per-tick integration: the frame loop runs one tick per display
//! frame, so there is no dt.

use std::f32::consts::FRAC_PI_4;

use super::state::Bird;

/// Apply one tick of gravity, then move
pub fn integrate(bird: &mut Bird, gravity: f32) {
    bird.vel += gravity;
    bird.pos.y += bird.vel;
}

/// Flap: velocity is replaced, not added to
pub fn apply_impulse(bird: &mut Bird, jump_impulse: f32) {
    bird.vel = jump_impulse;
}

/// Presentation tilt in radians, clamped to ±45°
pub fn tilt(vel: f32, tilt_factor: f32) -> f32 {
    (vel * tilt_factor).clamp(-FRAC_PI_4, FRAC_PI_4)
}
