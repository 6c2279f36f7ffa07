//! Session state and phase transitions
//!
//! One `Session` holds everything a run needs. It is passed explicitly to
//! the frame tick and to input handlers; nothing lives in globals.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::registry::ObstacleRegistry;
use super::score::ScoreEngine;
use super::spawner::Spawner;
use crate::Playfield;
use crate::audio::Cue;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start input
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    GameOver,
}

/// Notifications for the host, drained once per frame or input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First run began (hide the start overlay)
    Started,
    /// A new run began after game over (hide the game-over overlay)
    Restarted,
    /// Request a sound cue
    Sound(Cue),
    /// Score crossed a milestone
    Milestone(u64),
    /// A new best score to persist
    NewHighScore(f64),
    /// Run ended with this score
    GameOver { score: f64 },
}

/// A single-player session
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: GamePhase,
    pub actor: Actor,
    pub obstacles: ObstacleRegistry,
    pub spawner: Spawner,
    pub scoring: ScoreEngine,
    /// Best score seen, loaded from storage at startup
    pub high_score: f64,
    pub field: Playfield,
    pub tuning: Tuning,
    /// Timestamp of the previous frame (ms)
    pub(crate) last_frame_ms: Option<f64>,
    /// Set on game over; the frame loop stops rescheduling
    pub(crate) halted: bool,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(tuning: Tuning, width: f32, height: f32, high_score: f64, seed: u64) -> Self {
        let field = Playfield::new(width, height, tuning.ground_height);
        Self {
            phase: GamePhase::Idle,
            actor: Actor::new(&tuning.actor, field.floor_y()),
            obstacles: ObstacleRegistry::new(),
            spawner: Spawner::new(seed, tuning.spawn_interval),
            scoring: ScoreEngine::new(tuning.initial_speed),
            high_score: high_score.max(0.0),
            field,
            tuning,
            last_frame_ms: None,
            halted: false,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.scoring.score
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.scoring.speed
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Whether the frame loop should stop rescheduling
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Take the pending host notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Idle -> Running. A start while running is ignored; a start after
    /// game over restarts. Returns whether a run began.
    pub fn start(&mut self, now_ms: f64) -> bool {
        match self.phase {
            GamePhase::Idle => {
                self.phase = GamePhase::Running;
                self.spawner.stamp(now_ms, self.tuning.spawn_interval);
                self.last_frame_ms = Some(now_ms);
                self.halted = false;
                log::info!("Run started");
                self.emit(GameEvent::Started);
                true
            }
            GamePhase::GameOver => self.restart(now_ms),
            GamePhase::Running => false,
        }
    }

    /// GameOver -> Running with a full reset. The high score survives.
    pub fn restart(&mut self, now_ms: f64) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.scoring.reset(self.tuning.initial_speed);
        self.obstacles.clear();
        self.spawner.stamp(now_ms, self.tuning.spawn_interval);
        self.actor.crouching = false;
        self.actor.reset();
        self.last_frame_ms = Some(now_ms);
        self.halted = false;
        self.phase = GamePhase::Running;
        log::info!("Run restarted (best {:.0})", self.high_score);
        self.emit(GameEvent::Restarted);
        true
    }

    /// Primary input: start, restart or jump depending on phase
    pub fn action(&mut self, now_ms: f64) {
        match self.phase {
            GamePhase::Idle | GamePhase::GameOver => {
                self.start(now_ms);
            }
            GamePhase::Running => self.jump(),
        }
    }

    pub fn jump(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        if self.actor.jump(self.tuning.jump_impulse) {
            self.emit(GameEvent::Sound(Cue::Jump));
        }
    }

    pub fn crouch(&mut self, active: bool) {
        self.actor.crouch(active);
    }

    /// Surface resized
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = Playfield::new(width, height, self.tuning.ground_height);
        self.actor.set_floor(self.field.floor_y());
    }

    /// Running -> GameOver
    pub(crate) fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.halted = true;
        self.emit(GameEvent::Sound(Cue::Collision));

        let score = self.scoring.score;
        if score > self.high_score {
            self.high_score = score;
            log::info!("New high score: {:.0}", score);
            self.emit(GameEvent::NewHighScore(score));
        }
        log::info!("Game over at {:.0}", score);
        self.emit(GameEvent::GameOver { score });
    }
}
