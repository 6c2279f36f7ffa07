//! Axis-aligned collision detection with forgiving hitboxes
//!
//! Both boxes are inset by a fixed padding before the overlap test, so a
//! graze against the sprite edge does not end the run.

use glam::Vec2;

use super::actor::Actor;
use super::obstacle::Obstacle;

/// Axis-aligned box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Shrink by `padding` on every side. A box can shrink to nothing but
    /// never to a negative size.
    pub fn inset(&self, padding: f32) -> Self {
        let size = (self.size - Vec2::splat(padding * 2.0)).max(Vec2::ZERO);
        let origin = self.origin + (self.size - size) * 0.5;
        Self { origin, size }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Strict AABB overlap; touching edges and empty boxes do not overlap
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let a_max = self.origin + self.size;
        let b_max = other.origin + other.size;
        self.origin.x < b_max.x
            && a_max.x > other.origin.x
            && self.origin.y < b_max.y
            && a_max.y > other.origin.y
    }
}

/// Collision box of the runner. Ducking only counts on the ground.
pub fn actor_hitbox(actor: &Actor, padding: f32) -> Hitbox {
    Hitbox::new(actor.x, actor.y, actor.width, actor.current_height()).inset(padding)
}

pub fn obstacle_hitbox(obstacle: &Obstacle, padding: f32) -> Hitbox {
    Hitbox::new(obstacle.x, obstacle.y, obstacle.width, obstacle.height).inset(padding)
}

/// Whether the runner touches any obstacle
pub fn check_collision<'a, I>(actor: &Actor, obstacles: I, padding: f32) -> bool
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    let actor_box = actor_hitbox(actor, padding);
    obstacles
        .into_iter()
        .any(|o| actor_box.overlaps(&obstacle_hitbox(o, padding)))
}
