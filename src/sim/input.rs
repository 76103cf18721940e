//! Pointer input adapter
//!
//! Maps a horizontal pointer coordinate (window pixels) onto the paddle.

use super::state::World;
use crate::consts::PADDLE_WIDTH;

/// Center the paddle under the pointer.
///
/// Only X changes and nothing is clamped, so the paddle may leave the
/// window. Every call overwrites the previous position.
pub fn pointer_moved(world: &mut World, pointer_x: f32) {
    world.paddle.pos.x = pointer_x - PADDLE_WIDTH / 2.0;
}
