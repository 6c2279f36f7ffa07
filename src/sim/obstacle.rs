//! Obstacle entities and their placement policy

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Playfield;
use crate::consts::{LANE_HIGH, LANE_LOW, LANE_MID};
use crate::tuning::{Archetype, ArchetypeClass};

/// Altitude band of an aerial obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lane {
    High,
    Mid,
    Low,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::High, Lane::Mid, Lane::Low];

    /// Distance from the floor up to the obstacle's top edge
    pub fn altitude(&self) -> f32 {
        match self {
            Lane::High => LANE_HIGH,
            Lane::Mid => LANE_MID,
            Lane::Low => LANE_LOW,
        }
    }
}

/// Obstacle classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Grounded,
    Aerial(Lane),
}

impl ObstacleKind {
    /// Index into per-kind lookup tables
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            ObstacleKind::Grounded => 0,
            ObstacleKind::Aerial(_) => 1,
        }
    }
}

/// A live obstacle scrolling toward the runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether the obstacle has fully left the surface on the left
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Build an obstacle of the given archetype at the right edge of the playfield
pub fn place<R: Rng + ?Sized>(archetype: &Archetype, field: &Playfield, rng: &mut R) -> Obstacle {
    let floor = field.floor_y();
    let (y, kind) = match archetype.class {
        ArchetypeClass::Grounded => (floor - archetype.height, ObstacleKind::Grounded),
        ArchetypeClass::Aerial => {
            let lane = Lane::ALL[rng.random_range(0..Lane::ALL.len())];
            (floor - lane.altitude(), ObstacleKind::Aerial(lane))
        }
    };

    Obstacle {
        x: field.width,
        y,
        width: archetype.width,
        height: archetype.height,
        kind,
    }
}
