//! Render pass: world state in, draw commands out
//!
//! Reads the world and never mutates it, so it can run at any frame rate
//! regardless of how often the simulation ticks.

use glam::Vec2;

use super::shapes::circle_fan;
use super::vertex::colors;
use crate::consts::*;
use crate::sim::World;

/// A single flat-colored primitive in window pixel space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned filled quad from `min` spanning `size`
    Quad {
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Filled triangle fan; the first point is the hub
    TriangleFan { points: Vec<Vec2>, color: [f32; 4] },
}

/// Build the frame's draw commands: unhit blocks row by row, then the
/// paddle, then the ball.
pub fn draw_list(world: &World) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(BLOCK_ROWS * BLOCK_COLUMNS + 2);

    for (row, blocks) in world.blocks.iter().enumerate() {
        let color = colors::block_row(row);
        for (col, block) in blocks.iter().enumerate() {
            if block.is_hit {
                continue;
            }
            // One pixel gutter between neighbours
            commands.push(DrawCommand::Quad {
                min: Vec2::new(col as f32 * BLOCK_WIDTH, row as f32 * BLOCK_HEIGHT),
                size: Vec2::new(BLOCK_WIDTH - 1.0, BLOCK_HEIGHT - 1.0),
                color,
            });
        }
    }

    commands.push(DrawCommand::Quad {
        min: world.paddle.pos,
        size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        color: colors::PADDLE,
    });

    commands.push(DrawCommand::TriangleFan {
        points: circle_fan(world.ball.pos, BALL_RADIUS, CIRCLE_SEGMENTS),
        color: colors::BALL,
    });

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_grid_command_order() {
        let world = World::new();
        let commands = draw_list(&world);
        assert_eq!(commands.len(), 62);

        match &commands[0] {
            DrawCommand::Quad { min, size, color } => {
                assert_eq!(*min, Vec2::ZERO);
                assert_eq!(*size, Vec2::new(127.0, 31.0));
                assert_eq!(*color, colors::BLOCK_ROWS[0]);
            }
            other => panic!("expected block quad, got {:?}", other),
        }
        match &commands[60] {
            DrawCommand::Quad { min, color, .. } => {
                assert_eq!(*min, world.paddle.pos);
                assert_eq!(*color, colors::PADDLE);
            }
            other => panic!("expected paddle quad, got {:?}", other),
        }
        assert!(matches!(commands[61], DrawCommand::TriangleFan { .. }));
    }

    #[test]
    fn test_hit_blocks_are_skipped() {
        let mut world = World::new();
        world.blocks[0][0].is_hit = true;
        world.blocks[3][7].is_hit = true;

        let commands = draw_list(&world);
        assert_eq!(commands.len(), 60);
        let skipped = Vec2::new(7.0 * BLOCK_WIDTH, 3.0 * BLOCK_HEIGHT);
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Quad { min, .. } if *min == skipped)));
    }

    #[test]
    fn test_row_palette() {
        let world = World::new();
        let commands = draw_list(&world);
        for (i, command) in commands.iter().take(60).enumerate() {
            let DrawCommand::Quad { color, .. } = command else {
                panic!("expected quad");
            };
            assert_eq!(*color, colors::block_row(i / BLOCK_COLUMNS));
        }
        assert_ne!(colors::block_row(0), colors::block_row(5));
        assert_eq!(colors::block_row(6), colors::block_row(0));
    }

    #[test]
    fn test_ball_fan() {
        let world = World::new();
        let commands = draw_list(&world);
        let Some(DrawCommand::TriangleFan { points, color }) = commands.last() else {
            panic!("expected ball fan last");
        };
        assert_eq!(*color, colors::BALL);
        assert_eq!(points.len(), 34);
        assert_eq!(points[0], world.ball.pos);
    }
}
