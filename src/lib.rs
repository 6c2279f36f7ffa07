//! Dino Runner - an endless runner
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (actor physics, spawning, collisions, session state)
//! - `renderer`: Draw-command stage and WebGPU pipeline
//! - `platform`: Browser/native abstraction (storage, input)
//! - `tuning`: Data-driven game balance
//! - `game`: Host-facing loop driver wiring the simulation to its collaborators

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameHandle, FrameScheduler, Game};
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Reference frame duration (ms) that distance-per-frame formulas are normalized to
    pub const NOMINAL_FRAME_MS: f64 = 16.0;

    /// Default logical surface size when the host has not reported one yet
    pub const DEFAULT_SURFACE_WIDTH: f32 = 800.0;
    pub const DEFAULT_SURFACE_HEIGHT: f32 = 300.0;

    /// Heights of the aerial lanes above the floor (top edge of the obstacle)
    pub const LANE_HIGH: f32 = 120.0;
    pub const LANE_MID: f32 = 80.0;
    pub const LANE_LOW: f32 = 50.0;

    /// Score interval that triggers the milestone cue
    pub const MILESTONE_STEP: u64 = 100;
}

/// Logical drawing surface dimensions plus the ground band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32, ground_height: f32) -> Self {
        Self {
            width,
            height,
            ground_height,
        }
    }

    /// Top edge of the ground band; entities standing on the ground end here
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.height - self.ground_height
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(
            consts::DEFAULT_SURFACE_WIDTH,
            consts::DEFAULT_SURFACE_HEIGHT,
            20.0,
        )
    }
}
