//! Simulation core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick advances the ball by exactly one velocity increment
//! - No rendering, platform, or logging dependencies
//! - No error surface; losing the ball is an ordinary reset

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Rect, block_cell};
pub use input::pointer_moved;
pub use state::{Ball, Block, Paddle, World};
pub use tick::{TickOutcome, tick};
