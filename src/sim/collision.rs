//! Axis-aligned collision helpers
//!
//! The ball is treated as a point for collision purposes; its radius only
//! matters when drawing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned box covering the half-open span `[min, min + size)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Check if a point lies inside the box (left/top edges inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x < max.x && p.y >= self.min.y && p.y < max.y
    }

    /// Check if a Y coordinate lies within the box's vertical span
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.min.y && y < self.max().y
    }
}

/// The window as a collision box
pub const WINDOW_RECT: Rect = Rect::new(Vec2::ZERO, Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT));

/// Grid cell `(row, column)` under a point, or `None` outside the grid.
///
/// Coordinates truncate toward zero before dividing, so points just left
/// of or above the window edge still land in column or row 0.
pub fn block_cell(p: Vec2) -> Option<(usize, usize)> {
    let col = p.x as i32 / BLOCK_WIDTH as i32;
    let row = p.y as i32 / BLOCK_HEIGHT as i32;
    if (0..BLOCK_COLUMNS as i32).contains(&col) && (0..BLOCK_ROWS as i32).contains(&row) {
        Some((row as usize, col as usize))
    } else {
        None
    }
}

/// Screen-space box of the block at `(row, column)`
pub fn block_rect(row: usize, col: usize) -> Rect {
    Rect::new(
        Vec2::new(col as f32 * BLOCK_WIDTH, row as f32 * BLOCK_HEIGHT),
        Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_half_open() {
        let rect = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(5.0, 5.0));
        assert!(rect.contains(Vec2::new(10.0, 20.0)));
        assert!(rect.contains(Vec2::new(14.9, 24.9)));
        assert!(!rect.contains(Vec2::new(15.0, 22.0)));
        assert!(!rect.contains(Vec2::new(12.0, 25.0)));
        assert!(!rect.contains(Vec2::new(9.9, 22.0)));
    }

    #[test]
    fn test_block_cell_inside_grid() {
        assert_eq!(block_cell(Vec2::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(block_cell(Vec2::new(648.5, 191.5)), Some((5, 5)));
        assert_eq!(block_cell(Vec2::new(1279.9, 10.0)), Some((0, 9)));
    }

    #[test]
    fn test_block_cell_outside_grid() {
        // Below the last row
        assert_eq!(block_cell(Vec2::new(640.0, 192.0)), None);
        assert_eq!(block_cell(Vec2::new(1280.0, 10.0)), None);
        assert_eq!(block_cell(Vec2::new(-200.0, 10.0)), None);
    }

    #[test]
    fn test_block_cell_truncates_toward_zero() {
        assert_eq!(block_cell(Vec2::new(-0.5, 10.0)), Some((0, 0)));
        assert_eq!(block_cell(Vec2::new(10.0, -0.5)), Some((0, 0)));
    }

    #[test]
    fn test_block_rect() {
        let rect = block_rect(5, 5);
        assert_eq!(rect.min, Vec2::new(640.0, 160.0));
        assert!(rect.contains_y(160.0));
        assert!(!rect.contains_y(192.0));
    }
}
