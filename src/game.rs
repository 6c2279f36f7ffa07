//! Host-facing game driver
//!
//! Wires a [`Session`] to its collaborators: key-value storage, audio, the
//! drawing surface and the host's frame scheduler. The driver owns the
//! pending frame handle so a restart can cancel the old schedule and re-arm
//! exactly once.

use crate::audio::SoundPlayer;
use crate::highscores::HighScore;
use crate::platform::{InputEvent, KeyValueStore, TapTracker};
use crate::renderer::{Canvas, Palette, draw_scene};
use crate::settings::Settings;
use crate::sim::{FrameControl, GameEvent, GamePhase, Session, tick};
use crate::tuning::Tuning;

/// Handle of a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Host per-frame callback scheduling (e.g. `requestAnimationFrame`)
pub trait FrameScheduler {
    /// Schedule one frame callback. `None` if the host refused.
    fn request(&mut self) -> Option<FrameHandle>;
    fn cancel(&mut self, handle: FrameHandle);
}

/// A session plus everything it talks to
pub struct Game<S: KeyValueStore, A: SoundPlayer, F: FrameScheduler> {
    pub session: Session,
    settings: Settings,
    high_score: HighScore,
    store: S,
    audio: A,
    scheduler: F,
    pending_frame: Option<FrameHandle>,
    taps: TapTracker,
}

impl<S: KeyValueStore, A: SoundPlayer, F: FrameScheduler> Game<S, A, F> {
    pub fn new(
        tuning: Tuning,
        width: f32,
        height: f32,
        seed: u64,
        store: S,
        audio: A,
        scheduler: F,
    ) -> Self {
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store, Settings::from_tuning(&tuning));
        let session = Session::new(tuning, width, height, high_score.value, seed);
        log::info!(
            "Game ready ({}x{}, seed {}, sound {}, dark {})",
            width,
            height,
            seed,
            settings.sound_enabled,
            settings.dark_mode
        );

        Self {
            session,
            settings,
            high_score,
            store,
            audio,
            scheduler,
            pending_frame: None,
            taps: TapTracker::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.settings.dark_mode)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// Whether a frame callback is outstanding
    pub fn is_armed(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Schedule the next frame unless one is already pending
    pub fn arm(&mut self) {
        if self.pending_frame.is_none() {
            self.pending_frame = self.scheduler.request();
            if self.pending_frame.is_none() {
                log::warn!("Host refused to schedule a frame");
            }
        }
    }

    /// Drop any pending frame and schedule a fresh one
    fn rearm(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel(handle);
        }
        self.arm();
    }

    /// Frame callback body: simulate, draw, notify, reschedule
    pub fn frame(&mut self, now_ms: f64, canvas: &mut dyn Canvas) -> FrameControl {
        // The handle that fired is spent
        self.pending_frame = None;

        if let Some(event) = self.taps.poll(now_ms) {
            self.handle_input(event, now_ms);
        }

        let control = tick(&mut self.session, now_ms);
        draw_scene(&self.session, &self.palette(), canvas);
        self.dispatch_events();

        if control == FrameControl::Continue {
            self.arm();
        }
        control
    }

    /// Draw without simulating (e.g. theme change while halted)
    pub fn redraw(&self, canvas: &mut dyn Canvas) {
        draw_scene(&self.session, &self.palette(), canvas);
    }

    pub fn handle_input(&mut self, event: InputEvent, now_ms: f64) {
        match event {
            InputEvent::Action => {
                let was = self.session.phase;
                self.session.action(now_ms);
                if was == GamePhase::GameOver && self.session.is_running() {
                    self.rearm();
                } else if was == GamePhase::Idle {
                    self.arm();
                }
            }
            InputEvent::CrouchBegin => self.session.crouch(true),
            InputEvent::CrouchEnd => self.session.crouch(false),
            InputEvent::Restart => {
                if self.session.restart(now_ms) {
                    self.rearm();
                }
            }
            InputEvent::ToggleSound => {
                let on = self.settings.toggle_sound();
                log::info!("Sound {}", if on { "on" } else { "off" });
                self.settings.save(&mut self.store);
            }
            InputEvent::ToggleDarkMode => {
                let dark = self.settings.toggle_dark_mode();
                log::info!("Dark mode {}", if dark { "on" } else { "off" });
                self.settings.save(&mut self.store);
            }
        }
        self.dispatch_events();
    }

    /// Touch tap: action, or a short crouch on double tap
    pub fn tap(&mut self, now_ms: f64) {
        let event = self.taps.tap(now_ms);
        self.handle_input(event, now_ms);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        log::info!("Surface resized to {}x{}", width, height);
        self.session.resize(width, height);
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Sound(cue) => {
                    if self.settings.sound_enabled {
                        if let Err(e) = self.audio.play(cue) {
                            log::warn!("Sound {:?} failed: {}", cue, e);
                        }
                    }
                }
                GameEvent::NewHighScore(score) => {
                    self.high_score.record(score, &mut self.store);
                }
                GameEvent::Started | GameEvent::Restarted => {}
                GameEvent::Milestone(_) | GameEvent::GameOver { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioError, Cue};
    use crate::platform::MemoryStore;
    use crate::renderer::VertexBatch;
    use crate::sim::{Obstacle, ObstacleKind};

    #[derive(Default)]
    struct FakeScheduler {
        next_id: i32,
        requested: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for FakeScheduler {
        fn request(&mut self) -> Option<FrameHandle> {
            self.next_id += 1;
            let handle = FrameHandle(self.next_id);
            self.requested.push(handle);
            Some(handle)
        }

        fn cancel(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }
    }

    #[derive(Default)]
    struct RecordingAudio {
        played: Vec<Cue>,
        fail: bool,
    }

    impl SoundPlayer for RecordingAudio {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            self.played.push(cue);
            if self.fail {
                Err(AudioError::Rejected("NotAllowedError".into()))
            } else {
                Ok(())
            }
        }
    }

    type TestGame = Game<MemoryStore, RecordingAudio, FakeScheduler>;

    fn game_with(store: MemoryStore) -> TestGame {
        Game::new(
            Tuning::default(),
            800.0,
            300.0,
            7,
            store,
            RecordingAudio::default(),
            FakeScheduler::default(),
        )
    }

    fn game() -> TestGame {
        game_with(MemoryStore::new())
    }

    fn crash(game: &mut TestGame, now: f64, canvas: &mut VertexBatch) {
        let floor = game.session.field.floor_y();
        game.session.obstacles.push(Obstacle {
            x: 60.0,
            y: floor - 50.0,
            width: 20.0,
            height: 50.0,
            kind: ObstacleKind::Grounded,
        });
        assert_eq!(game.frame(now, canvas), FrameControl::Halt);
    }

    #[test]
    fn test_loads_persisted_state() {
        let mut store = MemoryStore::new();
        store.set_item(HighScore::STORAGE_KEY, "321");
        store.set_item("runner_settings", r#"{"sound_enabled":false,"dark_mode":true}"#);
        let g = game_with(store);
        assert_eq!(g.session.high_score, 321.0);
        assert!(!g.settings().sound_enabled);
        assert_eq!(g.palette(), Palette::night());
    }

    #[test]
    fn test_loop_reschedules_each_frame() {
        let mut g = game();
        let mut canvas = VertexBatch::new(800.0, 300.0);
        g.arm();
        g.arm();
        assert_eq!(g.scheduler().requested.len(), 1);

        g.handle_input(InputEvent::Action, 0.0);
        for i in 1..=5 {
            assert_eq!(g.frame(i as f64 * 16.0, &mut canvas), FrameControl::Continue);
            assert!(g.is_armed());
        }
        assert_eq!(g.scheduler().requested.len(), 6);
        assert!(!canvas.vertices().is_empty());
    }

    #[test]
    fn test_game_over_stops_loop_and_restart_rearms_once() {
        let mut g = game();
        let mut canvas = VertexBatch::new(800.0, 300.0);
        g.arm();
        g.handle_input(InputEvent::Action, 0.0);
        g.frame(16.0, &mut canvas);
        crash(&mut g, 32.0, &mut canvas);
        assert!(!g.is_armed());
        let requests = g.scheduler().requested.len();

        g.handle_input(InputEvent::Restart, 500.0);
        assert_eq!(g.session.phase, GamePhase::Running);
        assert!(g.is_armed());
        assert_eq!(g.scheduler().requested.len(), requests + 1);
        assert!(g.scheduler().cancelled.is_empty());

        // A second restart request while running changes nothing
        g.handle_input(InputEvent::Restart, 510.0);
        assert_eq!(g.scheduler().requested.len(), requests + 1);
    }

    #[test]
    fn test_restart_cancels_stale_frame() {
        let mut g = game();
        let mut canvas = VertexBatch::new(800.0, 300.0);
        g.handle_input(InputEvent::Action, 0.0);
        crash(&mut g, 16.0, &mut canvas);
        // Host scheduled a stray frame (e.g. a resize redraw)
        g.arm();
        let stale = g.scheduler().requested.last().copied().unwrap();

        g.handle_input(InputEvent::Action, 100.0);
        assert_eq!(g.scheduler().cancelled, vec![stale]);
        assert!(g.is_armed());
    }

    #[test]
    fn test_sounds_respect_setting() {
        let mut g = game();
        g.handle_input(InputEvent::Action, 0.0);
        g.handle_input(InputEvent::Action, 10.0);
        assert_eq!(g.audio().played, vec![Cue::Jump]);

        let mut canvas = VertexBatch::new(800.0, 300.0);
        // Long enough to land, short of the first spawn
        for i in 1..80 {
            g.frame(i as f64 * 16.0, &mut canvas);
        }
        assert!(!g.session.actor.airborne);
        g.handle_input(InputEvent::ToggleSound, 1300.0);
        g.handle_input(InputEvent::Action, 1310.0);
        assert_eq!(g.audio().played, vec![Cue::Jump]);
        assert!(g.session.actor.airborne);
    }

    #[test]
    fn test_audio_failure_is_swallowed() {
        let mut g = Game::new(
            Tuning::default(),
            800.0,
            300.0,
            7,
            MemoryStore::new(),
            RecordingAudio {
                fail: true,
                ..Default::default()
            },
            FakeScheduler::default(),
        );
        g.handle_input(InputEvent::Action, 0.0);
        g.handle_input(InputEvent::Action, 10.0);
        assert!(g.session.actor.airborne);
    }

    #[test]
    fn test_new_record_is_persisted() {
        let mut g = game();
        let mut canvas = VertexBatch::new(800.0, 300.0);
        g.handle_input(InputEvent::Action, 0.0);
        g.session.scoring.score = 42.0;
        crash(&mut g, 16.0, &mut canvas);

        assert!(g.high_score().value > 42.0);
        let stored: f64 = g
            .store()
            .get_item(HighScore::STORAGE_KEY)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(stored, g.high_score().value);
        assert!(g.audio().played.contains(&Cue::Collision));
    }

    #[test]
    fn test_double_tap_crouch_released_by_frame() {
        let mut g = game();
        let mut canvas = VertexBatch::new(800.0, 300.0);
        g.tap(0.0);
        assert!(g.session.is_running());
        g.tap(100.0);
        assert!(g.session.actor.crouching);
        g.frame(400.0, &mut canvas);
        assert!(g.session.actor.crouching);
        g.frame(616.0, &mut canvas);
        assert!(!g.session.actor.crouching);
    }

    #[test]
    fn test_theme_change_while_halted_recolors_runner() {
        let mut g = game();
        let mut canvas = VertexBatch::new(800.0, 300.0);
        g.handle_input(InputEvent::Action, 0.0);
        crash(&mut g, 16.0, &mut canvas);

        g.handle_input(InputEvent::ToggleDarkMode, 100.0);
        g.redraw(&mut canvas);
        let night = Palette::night();
        let day = Palette::day();
        assert_eq!(canvas.clear_color(), night.background);
        assert!(canvas.vertices().iter().any(|v| v.color == night.runner));
        assert!(canvas.vertices().iter().all(|v| v.color != day.runner));
    }

    #[test]
    fn test_pointer_action_starts_jumps_and_restarts() {
        let mut g = game();
        let mut canvas = VertexBatch::new(800.0, 300.0);
        g.handle_input(InputEvent::Action, 0.0);
        assert!(g.session.is_running());
        assert!(g.is_armed());

        g.handle_input(InputEvent::Action, 5.0);
        assert!(g.session.actor.airborne);

        crash(&mut g, 16.0, &mut canvas);
        g.handle_input(InputEvent::Action, 200.0);
        assert!(g.session.is_running());
        assert!(g.is_armed());
        assert!(g.session.obstacles.is_empty());
    }

    #[test]
    fn test_crouched_jump_plays_cue_and_rises() {
        let mut g = game();
        let mut canvas = VertexBatch::new(800.0, 300.0);
        g.handle_input(InputEvent::Action, 0.0);
        g.handle_input(InputEvent::CrouchBegin, 1.0);
        g.handle_input(InputEvent::Action, 2.0);
        assert_eq!(g.audio().played, vec![Cue::Jump]);

        let standing = g.session.field.floor_y() - g.session.tuning.actor.height;
        g.frame(16.0, &mut canvas);
        assert!(g.session.actor.airborne);
        assert!(g.session.actor.y < standing);
    }

    #[test]
    fn test_dark_mode_toggle_saved() {
        let mut g = game();
        g.handle_input(InputEvent::ToggleDarkMode, 0.0);
        assert_eq!(g.palette(), Palette::night());
        let reloaded = Settings::load(g.store(), Settings::default());
        assert!(reloaded.dark_mode);
    }
}
