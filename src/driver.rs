//! Fixed-timestep driver
//!
//! Owns the world and paces the simulation at `TICK_RATE` no matter how
//! often the host renders. Pointer input is applied as soon as it arrives.

use crate::consts::*;
use crate::renderer::{DrawCommand, draw_list};
use crate::settings::Settings;
use crate::sim::{TickOutcome, World, pointer_moved, tick};

/// Game instance holding the world and loop bookkeeping
#[derive(Debug, Clone)]
pub struct Game {
    world: World,
    accumulator: f32,
    max_frame_dt: f32,
    /// Ticks run since start
    ticks: u64,
    /// Rounds ended by the ball leaving through the bottom
    rounds_lost: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        Self {
            world: World::new(),
            accumulator: 0.0,
            max_frame_dt: settings.max_frame_dt(),
            ticks: 0,
            rounds_lost: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn rounds_lost(&self) -> u32 {
        self.rounds_lost
    }

    /// Run exactly one simulation tick
    pub fn step(&mut self) -> TickOutcome {
        let outcome = tick(&mut self.world);
        self.ticks += 1;

        match outcome {
            TickOutcome::RoundLost => {
                self.rounds_lost += 1;
                log::info!(
                    "Round lost after {} ticks ({} rounds lost)",
                    self.ticks,
                    self.rounds_lost
                );
            }
            TickOutcome::BlockBroken { row, col } => {
                log::debug!(
                    "Block ({}, {}) broken, {} left",
                    row,
                    col,
                    self.world.blocks_remaining()
                );
            }
            TickOutcome::Continued => {}
        }

        outcome
    }

    /// Advance by a frame's elapsed time, returning the number of ticks run
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0).min(self.max_frame_dt);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop backlog the substep cap could not absorb
        if self.accumulator >= SIM_DT {
            log::warn!("Simulation falling behind, dropping {:.3}s", self.accumulator);
            self.accumulator %= SIM_DT;
        }

        substeps
    }

    /// Forward a pointer move (window pixels) to the paddle
    pub fn pointer_moved(&mut self, pointer_x: f32) {
        pointer_moved(&mut self.world, pointer_x);
    }

    /// Ball X, for hosts that steer the paddle themselves (demo/headless play)
    pub fn autopilot_target(&self) -> f32 {
        self.world.ball.pos.x
    }

    /// Draw commands for the current world
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        draw_list(&self.world)
    }

    /// Start over from a fresh world
    pub fn restart(&mut self) {
        self.world.init();
        self.accumulator = 0.0;
        log::info!("Game restarted");
    }
}
