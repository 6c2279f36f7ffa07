//! Dino Runner entry point
//!
//! Handles platform-specific initialization and hands frames to the game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use dino_runner::audio::WebAudio;
    use dino_runner::platform::{InputEvent, LocalStorage, map_key};
    use dino_runner::renderer::{RenderState, VertexBatch};
    use dino_runner::sim::GamePhase;
    use dino_runner::{FrameHandle, FrameScheduler, Game, Tuning};

    type WebGame = Game<LocalStorage, WebAudio, RafScheduler>;

    /// Schedules frames with `requestAnimationFrame`
    struct RafScheduler {
        app: Weak<RefCell<App>>,
    }

    impl FrameScheduler for RafScheduler {
        fn request(&mut self) -> Option<FrameHandle> {
            let window = web_sys::window()?;
            let app = self.app.clone();
            let closure = Closure::once(move |time: f64| {
                if let Some(app) = app.upgrade() {
                    on_frame(&app, time);
                }
            });
            let id = window
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .ok()?;
            closure.forget();
            Some(FrameHandle(id))
        }

        fn cancel(&mut self, handle: FrameHandle) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle.0);
            }
        }
    }

    /// Everything a frame callback touches
    struct App {
        game: WebGame,
        batch: VertexBatch,
        render_state: RenderState,
        canvas: HtmlCanvasElement,
    }

    impl App {
        fn present(&mut self) {
            match self
                .render_state
                .render(self.batch.vertices(), self.batch.clear_color())
            {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    let logical = self.render_state.logical_size;
                    self.render_state.resize(w, h, logical);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Repaint without simulating, for changes while the loop is halted
        fn redraw(&mut self) {
            self.game.redraw(&mut self.batch);
            self.present();
            self.update_hud();
        }

        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let client_w = self.canvas.client_width().max(1);
            let client_h = self.canvas.client_height().max(1);
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);

            let logical = glam::Vec2::new(client_w as f32, client_h as f32);
            self.game.resize(logical.x, logical.y);
            self.batch.resize(logical.x, logical.y);
            self.render_state.resize(width, height, logical);
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let phase = self.game.session.phase;
            let score = self.game.session.scoring.display_score().to_string();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&score));
            }
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&self.game.high_score().display().to_string()));
            }
            if let Some(el) = document.get_element_by_id("start-screen") {
                let _ = el
                    .class_list()
                    .toggle_with_force("hidden", phase != GamePhase::Idle);
            }
            for id in ["game-over", "restart"] {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el
                        .class_list()
                        .toggle_with_force("hidden", phase != GamePhase::GameOver);
                }
            }

            let settings = self.game.settings();
            if let Some(body) = document.body() {
                let _ = body
                    .class_list()
                    .toggle_with_force("dark-mode", settings.dark_mode);
            }
            let icons = [
                ("#toggle-mode .icon", if settings.dark_mode { "🌞" } else { "🌓" }),
                ("#toggle-sound .icon", if settings.sound_enabled { "🔊" } else { "🔇" }),
            ];
            for (selector, icon) in icons {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(icon));
                }
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn on_frame(app: &Rc<RefCell<App>>, time: f64) {
        let mut app = app.borrow_mut();
        let App { game, batch, .. } = &mut *app;
        game.frame(time, batch);
        app.present();
        app.update_hud();
    }

    /// Route one input to the game and refresh whatever a halted loop won't
    fn dispatch(app: &Rc<RefCell<App>>, event: InputEvent) {
        let mut app = app.borrow_mut();
        app.game.handle_input(event, now_ms());
        if app.game.session.is_halted() || !app.game.is_armed() {
            app.redraw();
        } else {
            app.update_hud();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dino Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let logical = glam::Vec2::new(client_w as f32, client_h as f32);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, logical)
            .await
            .expect("Failed to create device");

        // Optional balance override: <script id="tuning" type="application/json">
        let tuning_json = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content());
        let tuning = Tuning::load(tuning_json.as_deref());

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let game = Game::new(
                tuning,
                logical.x,
                logical.y,
                seed,
                LocalStorage::new(),
                WebAudio::new(),
                RafScheduler { app: weak.clone() },
            );
            RefCell::new(App {
                game,
                batch: VertexBatch::new(logical.x, logical.y),
                render_state,
                canvas: canvas.clone(),
            })
        });

        setup_keyboard(app.clone());
        setup_pointer(&canvas, app.clone());
        setup_buttons(app.clone());
        setup_resize(app.clone());

        {
            let mut a = app.borrow_mut();
            a.redraw();
            a.game.arm();
        }

        log::info!("Dino Runner running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = map_key(&event.code(), event.repeat(), true) {
                    // Keep space/arrows from scrolling the page
                    event.prevent_default();
                    dispatch(&app, input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = map_key(&event.code(), event.repeat(), false) {
                    dispatch(&app, input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            // prevent_default also suppresses the synthetic click
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.game.tap(now_ms());
                a.update_hud();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&app, InputEvent::Action);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let buttons = [
            ("restart", InputEvent::Restart),
            ("toggle-sound", InputEvent::ToggleSound),
            ("toggle-mode", InputEvent::ToggleDarkMode),
        ];
        for (id, input) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} element", id);
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&app, input);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            a.resize();
            if a.game.session.is_halted() {
                a.redraw();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Runner (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Optional tuning JSON file as the first argument
    let tuning_json = std::env::args().nth(1).and_then(|path| {
        std::fs::read_to_string(&path)
            .map_err(|e| log::warn!("Cannot read {}: {}", path, e))
            .ok()
    });
    autopilot::run(dino_runner::Tuning::load(tuning_json.as_deref()), 20_000);
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Headless run driven by a simple bot, useful for balancing
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use dino_runner::audio::SilentAudio;
    use dino_runner::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, NOMINAL_FRAME_MS};
    use dino_runner::platform::{InputEvent, MemoryStore};
    use dino_runner::renderer::VertexBatch;
    use dino_runner::sim::{FrameControl, ObstacleKind};
    use dino_runner::{FrameHandle, FrameScheduler, Game, Tuning};

    /// Frames are pumped by the loop below; handles only count requests
    #[derive(Default)]
    struct Pump {
        next: i32,
    }

    impl FrameScheduler for Pump {
        fn request(&mut self) -> Option<FrameHandle> {
            self.next += 1;
            Some(FrameHandle(self.next))
        }

        fn cancel(&mut self, _handle: FrameHandle) {}
    }

    /// How far ahead of the runner the bot reacts (px)
    const REACTION_PX: f32 = 90.0;

    pub fn run(tuning: Tuning, max_frames: u32) {
        let mut game = Game::new(
            tuning,
            DEFAULT_SURFACE_WIDTH,
            DEFAULT_SURFACE_HEIGHT,
            42,
            MemoryStore::new(),
            SilentAudio,
            Pump::default(),
        );
        let mut canvas = VertexBatch::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT);

        game.arm();
        game.handle_input(InputEvent::Action, 0.0);

        let mut now = 0.0;
        let mut frames = 0;
        while frames < max_frames && game.is_armed() {
            now += NOMINAL_FRAME_MS;
            frames += 1;
            steer(&mut game, now);
            if game.frame(now, &mut canvas) == FrameControl::Halt {
                break;
            }
        }

        log::info!(
            "Autopilot finished after {} frames: score {}, speed {:.2}, {} vertices last frame",
            frames,
            game.session.scoring.display_score(),
            game.session.speed(),
            canvas.vertices().len()
        );
    }

    fn steer<S, A, F>(game: &mut Game<S, A, F>, now: f64)
    where
        S: dino_runner::platform::KeyValueStore,
        A: dino_runner::audio::SoundPlayer,
        F: FrameScheduler,
    {
        let actor = &game.session.actor;
        let front = actor.x + actor.width;
        let next = game
            .session
            .obstacles
            .iter()
            .filter(|o| o.right() >= actor.x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .copied();

        let threat = next.filter(|o| o.x - front < REACTION_PX);
        let duck = matches!(threat.map(|o| o.kind), Some(ObstacleKind::Aerial(_)));
        let jump = matches!(threat.map(|o| o.kind), Some(ObstacleKind::Grounded));
        let (crouching, airborne) = (actor.crouching, actor.airborne);

        if duck != crouching {
            let input = if duck {
                InputEvent::CrouchBegin
            } else {
                InputEvent::CrouchEnd
            };
            game.handle_input(input, now);
        }
        if jump && !airborne {
            game.handle_input(InputEvent::Action, now);
        }
    }
}
