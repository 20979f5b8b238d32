//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in field coordinates; the
//! pipeline maps them to NDC.

use glam::Vec2;

use super::scene::DrawCommand;
use super::vertex::{Vertex, colors};

/// Tessellated frame ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear: [f32; 4],
    pub vertices: Vec<Vertex>,
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Rectangle whose centre sits at `offset` from `pivot`, rotated about `pivot`.
///
/// Positive rotation is clockwise on screen because y points down.
pub fn rotated_rect(
    pivot: Vec2,
    offset: Vec2,
    size: Vec2,
    rotation: f32,
    color: [f32; 4],
) -> [Vertex; 6] {
    let turn = Vec2::from_angle(rotation);
    let half = size / 2.0;
    let corner = |x: f32, y: f32| {
        let p = pivot + turn.rotate(offset + Vec2::new(x, y));
        Vertex::new(p.x, p.y, color)
    };
    let tl = corner(-half.x, -half.y);
    let tr = corner(half.x, -half.y);
    let bl = corner(-half.x, half.y);
    let br = corner(half.x, half.y);
    [tl, tr, bl, bl, tr, br]
}

/// The bird: body, wing, eye and beak, all rotated together
pub fn bird(center: Vec2, size: Vec2, rotation: f32) -> Vec<Vertex> {
    let parts = [
        (Vec2::ZERO, size, colors::BIRD_BODY),
        (
            Vec2::new(-size.x * 0.2, size.y * 0.1),
            size * Vec2::new(0.4, 0.35),
            colors::BIRD_WING,
        ),
        (
            Vec2::new(size.x * 0.22, -size.y * 0.18),
            Vec2::splat(size.y * 0.3),
            colors::BIRD_EYE,
        ),
        (
            Vec2::new(size.x * 0.27, -size.y * 0.18),
            Vec2::splat(size.y * 0.12),
            colors::BIRD_PUPIL,
        ),
        (
            Vec2::new(size.x * 0.5, size.y * 0.1),
            size * Vec2::new(0.25, 0.25),
            colors::BIRD_BEAK,
        ),
    ];

    let mut vertices = Vec::with_capacity(parts.len() * 6);
    for (offset, part_size, color) in parts {
        vertices.extend(rotated_rect(center, offset, part_size, rotation, color));
    }
    vertices
}

/// Turn draw commands into one triangle list
pub fn tessellate(commands: &[DrawCommand]) -> Frame {
    let mut frame = Frame {
        clear: colors::BACKGROUND,
        vertices: Vec::with_capacity(commands.len() * 6),
    };

    for command in commands {
        match *command {
            DrawCommand::Clear { color } => {
                frame.clear = color;
                frame.vertices.clear();
            }
            DrawCommand::Rect { min, size, color } => {
                frame.vertices.extend(rect(min, size, color));
            }
            DrawCommand::Bird {
                center,
                size,
                rotation,
            } => frame.vertices.extend(bird(center, size, rotation)),
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rect_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(5.0, 8.0), [1.0; 4]);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 15.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 28.0);
    }

    #[test]
    fn test_quarter_turn_is_clockwise_on_screen() {
        // A point to the right of the pivot ends up below it
        let v = rotated_rect(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::ZERO, FRAC_PI_2, [1.0; 4]);
        assert!(v[0].position[0].abs() < 1e-4);
        assert!((v[0].position[1] - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_tessellate_counts() {
        let commands = [
            DrawCommand::Clear {
                color: colors::BACKGROUND,
            },
            DrawCommand::Bird {
                center: Vec2::new(50.0, 300.0),
                size: Vec2::new(40.0, 30.0),
                rotation: 0.3,
            },
            DrawCommand::Rect {
                min: Vec2::ZERO,
                size: Vec2::ONE,
                color: colors::OBSTACLE,
            },
        ];
        let frame = tessellate(&commands);
        assert_eq!(frame.clear, colors::BACKGROUND);
        assert_eq!(frame.vertices.len(), 5 * 6 + 6);
    }
}
