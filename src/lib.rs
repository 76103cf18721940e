//! Arkanoid - a block breaker in a fixed 1280x720 window
//!
//! Core modules:
//! - `sim`: Simulation core (world state, tick, input adapter)
//! - `renderer`: Draw-command pass and WebGPU render boundary
//! - `driver`: Fixed-timestep driver owning the world
//! - `settings`: Presentation settings

pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window dimensions (pixels, origin top-left, Y down)
    pub const WINDOW_WIDTH: f32 = 1280.0;
    pub const WINDOW_HEIGHT: f32 = 720.0;
    pub const WINDOW_TITLE: &str = "Arkanoid";

    /// Block grid
    pub const BLOCK_WIDTH: f32 = 128.0;
    pub const BLOCK_HEIGHT: f32 = 32.0;
    pub const BLOCK_COLUMNS: usize = (WINDOW_WIDTH / BLOCK_WIDTH) as usize;
    pub const BLOCK_ROWS: usize = 6;

    /// Paddle size
    pub const PADDLE_WIDTH: f32 = 128.0;
    pub const PADDLE_HEIGHT: f32 = 32.0;
    /// Horizontal deflection factor at the paddle edge
    pub const PADDLE_DEFLECTION: f32 = 1.5;

    /// Ball radius (drawing only; collisions use the center point)
    pub const BALL_RADIUS: f32 = 10.0;

    /// Logical simulation rate
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ball speed in pixels per tick (crosses the window height in one second)
    pub const BALL_SPEED: f32 = WINDOW_HEIGHT / TICK_RATE;

    /// Rim segments of the ball's triangle fan
    pub const CIRCLE_SEGMENTS: u32 = 32;
}
