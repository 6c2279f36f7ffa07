//! Score accrual and difficulty ramp

use serde::{Deserialize, Serialize};

use crate::consts::{MILESTONE_STEP, NOMINAL_FRAME_MS};
use crate::tuning::Tuning;

/// Score and game speed for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEngine {
    pub score: f64,
    pub speed: f32,
    /// Highest milestone index already announced
    last_milestone: u64,
}

impl ScoreEngine {
    pub fn new(initial_speed: f32) -> Self {
        Self {
            score: 0.0,
            speed: initial_speed,
            last_milestone: 0,
        }
    }

    pub fn reset(&mut self, initial_speed: f32) {
        *self = Self::new(initial_speed);
    }

    /// Whole points shown to the player
    #[inline]
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// Advance one frame of `dt_ms` milliseconds.
    ///
    /// Score is normalized to the nominal frame and scaled by how far the
    /// speed has risen above its starting value; the speed ramp uses raw
    /// elapsed time. Returns the milestone (a multiple of
    /// [`MILESTONE_STEP`]) when the score crossed a new one this frame.
    pub fn update(&mut self, dt_ms: f64, tuning: &Tuning) -> Option<u64> {
        let dt_ms = dt_ms.max(0.0);
        let speed_factor = (self.speed / tuning.initial_speed) as f64;
        self.score += tuning.score_increment * (dt_ms / NOMINAL_FRAME_MS) * speed_factor;

        if self.speed < tuning.max_speed {
            self.speed = (self.speed + tuning.speed_increment * dt_ms as f32).min(tuning.max_speed);
        }

        let reached = self.display_score() / MILESTONE_STEP;
        if reached > self.last_milestone {
            self.last_milestone = reached;
            Some(reached * MILESTONE_STEP)
        } else {
            None
        }
    }
}
