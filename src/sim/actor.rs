//! The runner: vertical kinematics, jumping and crouching
//!
//! Screen coordinates grow downward, so "above the ground" means a smaller y.

use serde::{Deserialize, Serialize};

use crate::tuning::ActorGeometry;

/// The player-controlled runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Horizontal position (fixed for the whole run)
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub vel_y: f32,
    pub width: f32,
    pub normal_height: f32,
    pub crouch_height: f32,
    /// Extra drawn width while crouched
    pub crouch_widen: f32,
    pub crouching: bool,
    pub airborne: bool,
    /// Top edge of the ground band
    floor_y: f32,
}

impl Actor {
    /// Create a grounded actor standing on `floor_y`
    pub fn new(geometry: &ActorGeometry, floor_y: f32) -> Self {
        let mut actor = Self {
            x: geometry.x,
            y: 0.0,
            vel_y: 0.0,
            width: geometry.width,
            normal_height: geometry.height,
            crouch_height: geometry.crouch_height,
            crouch_widen: geometry.crouch_widen,
            crouching: false,
            airborne: false,
            floor_y,
        };
        actor.reset();
        actor
    }

    /// Whether the crouch posture is in effect (crouched and on the ground)
    #[inline]
    pub fn is_ducked(&self) -> bool {
        self.crouching && !self.airborne
    }

    /// Effective height for drawing and collision
    #[inline]
    pub fn current_height(&self) -> f32 {
        if self.is_ducked() {
            self.crouch_height
        } else {
            self.normal_height
        }
    }

    /// Drawn width (crouching widens the sprite)
    #[inline]
    pub fn draw_width(&self) -> f32 {
        if self.is_ducked() {
            self.width + self.crouch_widen
        } else {
            self.width
        }
    }

    /// Resting y for the current posture
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.floor_y - self.current_height()
    }

    pub fn floor_y(&self) -> f32 {
        self.floor_y
    }

    /// Apply one frame of gravity and clamp to the ground.
    ///
    /// Gravity is a per-frame constant and deliberately not scaled by
    /// elapsed time.
    pub fn update(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.y += self.vel_y;

        // Landing can switch posture, so land() re-reads the ground clamp
        if self.y >= self.ground_y() {
            self.land();
        } else {
            self.airborne = true;
        }
    }

    fn land(&mut self) {
        self.airborne = false;
        self.vel_y = 0.0;
        self.y = self.ground_y();
    }

    /// Start a jump. Returns `false` if already airborne.
    ///
    /// A jump from the ducked pose leaves from the standing pose, since the
    /// airborne actor always has its full height.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.airborne {
            return false;
        }
        if self.is_ducked() {
            self.y = self.floor_y - self.normal_height;
        }
        self.vel_y = impulse;
        self.airborne = true;
        true
    }

    /// Set or clear the crouch posture
    pub fn crouch(&mut self, active: bool) {
        self.crouching = active;
        if !self.airborne {
            // Posture changes the resting height
            self.y = self.ground_y();
        }
    }

    /// Snap back to the ground with no motion
    pub fn reset(&mut self) {
        self.vel_y = 0.0;
        self.airborne = false;
        self.y = self.ground_y();
    }

    /// Move the floor (surface resized)
    pub fn set_floor(&mut self, floor_y: f32) {
        self.floor_y = floor_y;
        if !self.airborne {
            self.y = self.ground_y();
        } else if self.y > self.ground_y() {
            self.land();
        }
    }
}
