//! Pure scene description: game state in, draw commands out

use glam::Vec2;

use super::vertex::colors;
use crate::sim::{GameState, tilt};
use crate::tuning::Tuning;

/// One drawing primitive in field coordinates (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole field
    Clear { color: [f32; 4] },
    /// Axis-aligned filled rectangle
    Rect {
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// The bird sprite, rotated about its centre
    Bird {
        center: Vec2,
        size: Vec2,
        rotation: f32,
    },
}

/// Build the frame: background, bird, then both barriers of every obstacle
pub fn draw_commands(state: &GameState, tuning: &Tuning) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(2 + state.obstacles.len() * 2);
    commands.push(DrawCommand::Clear {
        color: colors::BACKGROUND,
    });

    let bird = &state.bird;
    commands.push(DrawCommand::Bird {
        center: bird.pos,
        size: Vec2::new(bird.width, bird.height),
        rotation: tilt(bird.vel, tuning.tilt_factor),
    });

    for obstacle in &state.obstacles {
        commands.push(DrawCommand::Rect {
            min: Vec2::new(obstacle.x, 0.0),
            size: Vec2::new(obstacle.width, obstacle.gap_top),
            color: colors::OBSTACLE,
        });
        let bottom = obstacle.gap_bottom();
        commands.push(DrawCommand::Rect {
            min: Vec2::new(obstacle.x, bottom),
            size: Vec2::new(obstacle.width, tuning.field_height - bottom),
            color: colors::OBSTACLE,
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::sim::Obstacle;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_idle_scene_is_background_and_bird() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning, HighScore::default());
        let commands = draw_commands(&state, &tuning);
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
        assert_eq!(
            commands[1],
            DrawCommand::Bird {
                center: Vec2::new(50.0, 300.0),
                size: Vec2::new(40.0, 30.0),
                rotation: 0.0,
            }
        );
    }

    #[test]
    fn test_obstacle_barriers_span_field() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, HighScore::default());
        state.obstacles.push(Obstacle::new(120.0, 200.0, &tuning));
        state.bird.vel = 20.0;

        let commands = draw_commands(&state, &tuning);
        assert_eq!(commands.len(), 4);
        assert!(matches!(
            commands[1],
            DrawCommand::Bird { rotation, .. } if rotation == FRAC_PI_4
        ));
        assert_eq!(
            commands[2],
            DrawCommand::Rect {
                min: Vec2::new(120.0, 0.0),
                size: Vec2::new(50.0, 200.0),
                color: colors::OBSTACLE,
            }
        );
        assert_eq!(
            commands[3],
            DrawCommand::Rect {
                min: Vec2::new(120.0, 350.0),
                size: Vec2::new(50.0, 250.0),
                color: colors::OBSTACLE,
            }
        );
    }
}
