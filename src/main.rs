//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use brick_breaker::consts::FRAME_DT;
    use brick_breaker::highscores::LocalStorageStore;
    use brick_breaker::renderer::{RenderState, build_scene};
    use brick_breaker::{Game, Tuning, hud};

    /// Game plus the browser-side pieces around it
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        last_time: f64,
        /// Last HUD string written, to skip redundant DOM writes
        last_hud: String,
    }

    impl App {
        /// Convert a client-space x to canvas units
        fn to_canvas_x(&self, client_x: f64) -> f32 {
            let rect = self.canvas.get_bounding_client_rect();
            let logical = self.game.state().tuning.canvas_width as f64;
            let scale = logical / rect.width().max(1.0);
            ((client_x - rect.left()) * scale) as f32
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(self.game.state());
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
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let text = self.game.hud_text();
            if text != self.last_hud {
                if let Some(el) = document.get_element_by_id("scoreBoard") {
                    el.set_text_content(Some(&text));
                }
                self.last_hud = text;
            }

            if let Some(el) = document.get_element_by_id("gameOver") {
                match hud::game_over_text(self.game.state()) {
                    Some(over) => {
                        let body = format!("{}\n{}\n{}", over.title, over.final_score, over.prompt);
                        el.set_text_content(Some(&body));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Brick Breaker starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("No #gameCanvas element");
                return;
            }
        };

        let tuning = Tuning::load();
        let width = tuning.canvas_width as u32;
        let height = tuning.canvas_height as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let logical = (tuning.canvas_width, tuning.canvas_height);

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, tuning, Box::new(LocalStorageStore));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = match RenderState::new(surface, &adapter, width, height, logical).await
        {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                None
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            canvas: canvas.clone(),
            last_time: 0.0,
            last_hud: String::new(),
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_restart_button(app.clone());

        request_animation_frame(app);

        log::info!("Brick Breaker running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == "ArrowLeft" || key == "ArrowRight" {
                    event.prevent_default();
                }
                app.borrow_mut().game.key_down(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - absolute paddle position
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let x = a.to_canvas_x(event.client_x() as f64);
                a.game.pointer_moved(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (drag)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut a = app.borrow_mut();
                    let x = a.to_canvas_x(touch.client_x() as f64);
                    a.game.pointer_moved(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            a.last_time = time;

            a.game.frame(dt);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Frames the headless demo plays before stopping (five minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u32 = 5 * 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::{Game, MemoryStore, Tuning};
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode plays a headless autopilot session - run with `trunk serve` for the web version");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let mut game = Game::new(seed, Tuning::load(), Box::new(MemoryStore::new()));
    game.key_down("i");

    for frame in 0..DEMO_FRAMES {
        game.step();
        if frame % 600 == 0 {
            log::info!("{}", game.hud_text());
        }
        if game.state().is_game_over() {
            break;
        }
    }

    println!("{}", game.hud_text());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
