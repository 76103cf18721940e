//! World state and core simulation types
//!
//! Plain data: one ball, one paddle, and a fixed block grid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// A destructible brick in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Set once when the ball breaks it; cleared only by a world reset
    pub is_hit: bool,
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner. X follows the pointer unclamped, Y never changes.
    pub pos: Vec2,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                WINDOW_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
                WINDOW_HEIGHT - PADDLE_HEIGHT * 2.0,
            ),
        }
    }
}

impl Paddle {
    /// Bounding box for collision detection
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT))
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + PADDLE_WIDTH / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Position before the current tick's move, restored on any collision
    pub last_pos: Vec2,
    /// Displacement per tick; its length is always `BALL_SPEED`
    pub vel: Vec2,
}

impl Default for Ball {
    fn default() -> Self {
        let start = Vec2::new(WINDOW_WIDTH / 2.0, BLOCK_HEIGHT * BLOCK_ROWS as f32);
        Self {
            pos: start,
            last_pos: start,
            vel: Vec2::ONE.normalize() * BALL_SPEED,
        }
    }
}

impl Ball {
    /// Undo this tick's move
    #[inline]
    pub fn roll_back(&mut self) {
        self.pos = self.last_pos;
    }
}

/// Block grid indexed `[row][column]`
pub type BlockGrid = [[Block; BLOCK_COLUMNS]; BLOCK_ROWS];

/// Complete world state, owned by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub blocks: BlockGrid,
    pub paddle: Paddle,
    pub ball: Ball,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a world in its round-start configuration
    pub fn new() -> Self {
        Self {
            blocks: [[Block::default(); BLOCK_COLUMNS]; BLOCK_ROWS],
            paddle: Paddle::default(),
            ball: Ball::default(),
        }
    }

    /// Reset to the round-start configuration: every block unhit, paddle
    /// centered near the bottom, ball above the grid heading down-right.
    pub fn init(&mut self) {
        *self = Self::new();
    }

    /// Number of blocks not yet broken this round
    pub fn blocks_remaining(&self) -> usize {
        self.blocks.iter().flatten().filter(|b| !b.is_hit).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_layout() {
        let world = World::new();
        assert_eq!(world.blocks_remaining(), BLOCK_ROWS * BLOCK_COLUMNS);
        assert_eq!(world.paddle.pos, Vec2::new(576.0, 656.0));
        assert_eq!(world.ball.pos, Vec2::new(640.0, 192.0));
        assert_eq!(world.ball.last_pos, world.ball.pos);
    }

    #[test]
    fn test_grid_dimensions() {
        let world = World::new();
        assert_eq!(world.blocks.len(), 6);
        assert_eq!(world.blocks[0].len(), 10);
    }

    #[test]
    fn test_start_velocity() {
        let ball = Ball::default();
        assert!((ball.vel.length() - BALL_SPEED).abs() < 1e-4);
        assert!(ball.vel.x > 0.0 && ball.vel.y > 0.0);
        assert!((ball.vel.x - ball.vel.y).abs() < 1e-6);
    }

    #[test]
    fn test_init_clears_round() {
        let mut world = World::new();
        world.blocks[2][3].is_hit = true;
        world.paddle.pos.x = -300.0;
        world.ball.pos = Vec2::new(5.0, 5.0);
        world.ball.vel = Vec2::new(-BALL_SPEED, 0.0);

        world.init();
        assert_eq!(world, World::new());
    }

    #[test]
    fn test_paddle_bounds() {
        let paddle = Paddle::default();
        assert_eq!(paddle.center_x(), 640.0);
        let rect = paddle.bounds();
        assert!(rect.contains(Vec2::new(576.0, 656.0)));
        assert!(!rect.contains(Vec2::new(704.0, 660.0)));
    }
}
