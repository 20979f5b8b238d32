//! Axis-aligned collision detection
//!
//! Field coordinates: origin top-left, y grows downward. All tests use strict
//! inequalities, so rectangles that only touch do not collide on either axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crash {
    /// Bird top went above the field
    Ceiling,
    /// Bird bottom went below the field
    Floor,
    UpperBarrier,
    LowerBarrier,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        rect_overlap(self, other)
    }
}

/// Strict overlap on both axes
pub fn rect_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.max.x > b.min.x && a.min.x < b.max.x && a.max.y > b.min.y && a.min.y < b.max.y
}

/// Upper and lower barrier rectangles of an obstacle
pub fn barrier_rects(obstacle: &Obstacle, field_height: f32) -> (Aabb, Aabb) {
    let upper = Aabb::new(
        Vec2::new(obstacle.x, 0.0),
        Vec2::new(obstacle.right(), obstacle.gap_top),
    );
    let lower = Aabb::new(
        Vec2::new(obstacle.x, obstacle.gap_bottom()),
        Vec2::new(obstacle.right(), field_height),
    );
    (upper, lower)
}

/// Which barrier (if any) the bird box touches
pub fn obstacle_contact(bird: &Aabb, obstacle: &Obstacle, field_height: f32) -> Option<Crash> {
    let (upper, lower) = barrier_rects(obstacle, field_height);
    if bird.overlaps(&upper) {
        Some(Crash::UpperBarrier)
    } else if bird.overlaps(&lower) {
        Some(Crash::LowerBarrier)
    } else {
        None
    }
}

pub fn collides_with_obstacle(bird: &Aabb, obstacle: &Obstacle, field_height: f32) -> bool {
    obstacle_contact(bird, obstacle, field_height).is_some()
}

/// Whether the bird box has left the field vertically
pub fn field_contact(bird: &Aabb, field_height: f32) -> Option<Crash> {
    if bird.max.y > field_height {
        Some(Crash::Floor)
    } else if bird.min.y < 0.0 {
        Some(Crash::Ceiling)
    } else {
        None
    }
}

pub fn out_of_field(bird: &Aabb, field_height: f32) -> bool {
    field_contact(bird, field_height).is_some()
}
