//! Alex Rain entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use alex_rain::audio::{AudioManager, SoundEffect};
    use alex_rain::consts::*;
    use alex_rain::renderer::{RenderState, frame_vertices};
    use alex_rain::settings::Settings;
    use alex_rain::sim::{RapierPhysics, SimEvent, SimState, TickInput, tick};
    use glam::Vec2;

    /// Game instance holding all state
    struct Game {
        state: SimState,
        physics: RapierPhysics,
        render_state: Option<RenderState>,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        canvas_size: (f32, f32),
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let mut physics = RapierPhysics::new(GRAVITY);
            let state = SimState::new(&mut physics, seed);

            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_music_volume(settings.music_volume);
            audio.set_muted(settings.muted);

            Self {
                state,
                physics,
                render_state: None,
                audio,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                canvas_size: (FIELD_WIDTH, FIELD_HEIGHT),
            }
        }

        fn set_canvas_size(&mut self, w: f32, h: f32) {
            self.canvas_size = (w, h);
        }

        /// Convert canvas-client coordinates to field coordinates
        fn client_to_field(&self, x: f32, y: f32) -> Vec2 {
            let (w, h) = self.canvas_size;
            Vec2::new(x / w * FIELD_WIDTH, y / h * FIELD_HEIGHT)
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &mut self.physics, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.pointer = None;
            }

            for event in self.state.take_events() {
                match event {
                    SimEvent::FloorContact => self.audio.play(SoundEffect::Dribble),
                    SimEvent::Exploded => self.audio.play(SoundEffect::Explosion),
                    SimEvent::SweepStarted => self.audio.start_wiper(),
                    SimEvent::SweepStopped => self.audio.stop_wiper(),
                    SimEvent::Spawned { .. } => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = frame_vertices(&self.state, &self.physics);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.query_selector("#hud-count .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.count().to_string()));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Alex Rain starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut()
            .set_canvas_size(client_w as f32, client_h as f32);

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, (FIELD_WIDTH, FIELD_HEIGHT))
                .await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Start frame loop
        request_animation_frame(game);

        log::info!("Alex Rain running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse press - spawn or detonate
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let w = canvas_clone.client_width() as f32;
                let h = canvas_clone.client_height() as f32;
                g.set_canvas_size(w, h);

                let pos = g.client_to_field(event.offset_x() as f32, event.offset_y() as f32);
                g.input.pointer = Some(pos);

                // Every press pops; the first one also starts the music
                g.audio.resume();
                g.audio.play(SoundEffect::Pop);
                g.audio.start_music();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let w = canvas_clone.client_width() as f32;
                    let h = canvas_clone.client_height() as f32;
                    g.set_canvas_size(w, h);

                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    let pos = g.client_to_field(x, y);
                    g.input.pointer = Some(pos);

                    g.audio.resume();
                    g.audio.play(SoundEffect::Pop);
                    g.audio.start_music();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
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
    log::info!("Alex Rain (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless smoke run: click in a grid until an explosive Alex appears,
/// detonate it, then let the world settle.
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use alex_rain::consts::*;
    use alex_rain::sim::{Physics, RapierPhysics, SimState, TickInput, tick};
    use glam::Vec2;

    let mut physics = RapierPhysics::new(GRAVITY);
    let mut state = SimState::new(&mut physics, 2024);

    for n in 0..EXPLOSIVE_SPAWN_PERIOD {
        let pos = Vec2::new(
            50.0 + (n % 8) as f32 * 55.0,
            50.0 + (n / 8) as f32 * 40.0,
        );
        let input = TickInput { pointer: Some(pos) };
        tick(&mut state, &mut physics, &input, SIM_DT);
    }
    assert_eq!(state.count() as u32, EXPLOSIVE_SPAWN_PERIOD);

    let bomb = state
        .entities
        .iter()
        .find(|e| e.is_explosive())
        .copied()
        .expect("90th spawn should be explosive");
    let bomb_pos = physics
        .body_state(bomb.body)
        .expect("bomb body should be live")
        .position;

    let input = TickInput {
        pointer: Some(bomb_pos),
    };
    tick(&mut state, &mut physics, &input, SIM_DT);
    assert_eq!(state.count() as u32, EXPLOSIVE_SPAWN_PERIOD - 1);

    for _ in 0..600 {
        tick(&mut state, &mut physics, &TickInput::default(), SIM_DT);
    }

    log::info!(
        "smoke run done: {} Alexes left after {} ticks, sweep active: {}",
        state.count(),
        state.time_ticks,
        state.sweep.active
    );
    println!("✓ Smoke run passed!");
}
