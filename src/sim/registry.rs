//! Live obstacle set

use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use crate::consts::NOMINAL_FRAME_MS;

/// On-screen obstacles in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Scroll every obstacle left and drop the ones that left the surface.
    ///
    /// Travel is normalized to the nominal frame so motion speed does not
    /// depend on the host frame rate. Returns how many were pruned.
    pub fn advance(&mut self, dt_ms: f64, speed: f32) -> usize {
        let dx = (speed as f64 * (dt_ms / NOMINAL_FRAME_MS)) as f32;
        for obstacle in &mut self.obstacles {
            obstacle.x -= dx;
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_offscreen());
        before - self.obstacles.len()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
