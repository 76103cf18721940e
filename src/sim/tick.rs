//! Fixed-step simulation tick
//!
//! Advances the ball by one velocity increment and resolves collisions in a
//! fixed priority order: bottom exit, side walls, top wall, paddle, blocks.
//! The checks are not exclusive. Each one that fires rolls the ball back to
//! its pre-tick position and adjusts velocity, and later checks see the
//! rolled-back position.

use super::collision::{WINDOW_RECT, block_cell, block_rect};
use super::state::{Ball, BlockGrid, Paddle, World};
use crate::consts::*;

/// What a single tick did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ball moved; no block broke
    Continued,
    /// Ball broke the block at `(row, col)`
    BlockBroken { row: usize, col: usize },
    /// Ball left through the bottom and the world was reset
    RoundLost,
}

/// Advance the world by one tick
pub fn tick(world: &mut World) -> TickOutcome {
    let ball = &mut world.ball;
    ball.last_pos = ball.pos;
    ball.pos += ball.vel;

    if ball.pos.y >= WINDOW_HEIGHT {
        world.init();
        return TickOutcome::RoundLost;
    }

    bounce_walls(&mut world.ball);
    bounce_paddle(&mut world.ball, &world.paddle);

    match break_block(&mut world.ball, &mut world.blocks) {
        Some((row, col)) => TickOutcome::BlockBroken { row, col },
        None => TickOutcome::Continued,
    }
}

/// Reflect off the side walls, then the top wall
fn bounce_walls(ball: &mut Ball) {
    if ball.pos.x < WINDOW_RECT.min.x || ball.pos.x >= WINDOW_RECT.max().x {
        ball.roll_back();
        ball.vel.x = -ball.vel.x;
    }
    // The bottom edge is handled as a round loss before we get here
    if !WINDOW_RECT.contains_y(ball.pos.y) {
        ball.roll_back();
        ball.vel.y = -ball.vel.y;
    }
}

/// Angle-dependent paddle bounce: the further from center, the steeper
fn bounce_paddle(ball: &mut Ball, paddle: &Paddle) {
    if !paddle.bounds().contains(ball.pos) {
        return;
    }
    ball.roll_back();

    let offset = (ball.pos.x - paddle.center_x()) / (PADDLE_WIDTH / 2.0);
    ball.vel.x = offset * PADDLE_DEFLECTION;
    ball.vel.y = -ball.vel.y.signum();
    ball.vel = ball.vel.normalize() * BALL_SPEED;
}

/// Break the unhit block under the ball, if any
fn break_block(ball: &mut Ball, blocks: &mut BlockGrid) -> Option<(usize, usize)> {
    let (row, col) = block_cell(ball.pos)?;
    let block = &mut blocks[row][col];
    if block.is_hit {
        return None;
    }

    ball.roll_back();
    block.is_hit = true;

    // Approached from inside the row band: side hit
    if block_rect(row, col).contains_y(ball.last_pos.y) {
        ball.vel.x = -ball.vel.x;
    } else {
        ball.vel.y = -ball.vel.y;
    }

    Some((row, col))
}
