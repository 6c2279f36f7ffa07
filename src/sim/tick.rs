//! Per-frame simulation step
//!
//! Driven by the host's frame callback with a monotonically increasing
//! timestamp. Frame lengths vary; each subsystem normalizes the delta its
//! own way.

use super::collision::check_collision;
use super::state::{GameEvent, GamePhase, Session};
use crate::audio::Cue;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Halt,
}

/// Advance the session to `now_ms`
pub fn tick(session: &mut Session, now_ms: f64) -> FrameControl {
    let dt = match session.last_frame_ms {
        Some(prev) => (now_ms - prev).max(0.0),
        None => 0.0,
    };
    session.last_frame_ms = Some(now_ms);

    if session.phase == GamePhase::Running {
        step(session, now_ms, dt);
    }

    if session.halted {
        FrameControl::Halt
    } else {
        FrameControl::Continue
    }
}

fn step(session: &mut Session, now_ms: f64, dt: f64) {
    session.actor.update(session.tuning.gravity);

    let speed = session.scoring.speed;
    session.spawner.maybe_spawn(
        now_ms,
        speed,
        &mut session.obstacles,
        &session.field,
        &session.tuning,
    );
    session.obstacles.advance(dt, speed);

    if let Some(milestone) = session.scoring.update(dt, &session.tuning) {
        log::debug!("Milestone {}", milestone);
        session.emit(GameEvent::Milestone(milestone));
        session.emit(GameEvent::Sound(Cue::Point));
    }

    if check_collision(
        &session.actor,
        session.obstacles.iter(),
        session.tuning.hitbox_padding,
    ) {
        session.game_over();
    }
}
