//! Runner simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Timestamps come from the host
//! - Seeded RNG only
//! - Side effects leave as `GameEvent`s for the host to act on

pub mod actor;
pub mod collision;
pub mod obstacle;
pub mod registry;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use collision::{Hitbox, actor_hitbox, check_collision, obstacle_hitbox};
pub use obstacle::{Lane, Obstacle, ObstacleKind};
pub use registry::ObstacleRegistry;
pub use score::ScoreEngine;
pub use spawner::{Spawner, next_interval};
pub use state::{GameEvent, GamePhase, Session};
pub use tick::{FrameControl, tick};
