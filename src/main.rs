//! Arkanoid entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use arkanoid::consts::*;
    use arkanoid::renderer::{RenderState, surface_to_window};
    use arkanoid::{Game, Settings};

    /// Browser-side state around the game
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        last_time: f64,
    }

    impl App {
        fn new(settings: &Settings) -> Self {
            Self {
                game: Game::new(settings),
                render_state: None,
                last_time: 0.0,
            }
        }

        /// Advance the simulation by the time since the last frame, then draw
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            self.game.update(dt);
            self.render();
        }

        fn render(&mut self) {
            let commands = self.game.draw_list();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&commands) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let settings = Settings::load();
        if console_log::init_with_level(settings.log_level()).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("{} starting...", WINDOW_TITLE);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };
        document.set_title(WINDOW_TITLE);

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"canvas\"> element");
            return;
        };

        let (width, height) = fit_canvas(&canvas);

        let app = Rc::new(RefCell::new(App::new(&settings)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
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
                power_preference: wgpu::PowerPreference::default(),
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

        match RenderState::new(surface, &adapter, width, height, settings.vsync).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_pointer_handler(&canvas, app.clone());
        setup_resize_handler(&canvas, app.clone());

        request_animation_frame(app);
        log::info!("{} running!", WINDOW_TITLE);
    }

    /// Size the canvas backing store to its displayed size in device pixels
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let width = ((canvas.client_width().max(1) as f64) * dpr) as u32;
        let height = ((canvas.client_height().max(1) as f64) * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    /// Pointer motion drives the paddle; offsets are mapped through the
    /// letterbox from CSS pixels to window pixels.
    fn setup_pointer_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let client = (
                canvas_clone.client_width().max(1) as u32,
                canvas_clone.client_height().max(1) as u32,
            );
            let offset = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            let p = surface_to_window(offset, client);
            app.borrow_mut().game.pointer_moved(p.x);
        });
        let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&canvas_clone);
            if let Some(ref mut render_state) = app.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
        app.borrow_mut().frame(time);
        request_animation_frame(app);
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
    log::info!("{} (native) starting...", arkanoid::consts::WINDOW_TITLE);
    log::info!("Native mode runs headless - build for wasm32 to play in a browser");

    let settings = arkanoid::Settings::load();
    run_headless(&settings, 60.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the game with the autopilot at a render rate unrelated to the tick
/// rate, and report what happened.
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(settings: &arkanoid::Settings, seconds: f32) {
    use arkanoid::Game;
    use arkanoid::renderer::shapes::tessellate;

    const FRAME_RATE: f32 = 144.0;
    // Aim right of the ball so returns leave at an angle
    const AIM_OFFSET: f32 = 20.0;

    let mut game = Game::new(settings);
    let frames = (seconds * FRAME_RATE) as u32;
    let mut vertex_count = 0;

    for _ in 0..frames {
        game.pointer_moved(game.autopilot_target() + AIM_OFFSET);
        game.update(1.0 / FRAME_RATE);
        vertex_count = tessellate(&game.draw_list()).len();
    }

    log::info!(
        "{} frames, {} ticks: {} blocks left, {} rounds lost, {} vertices in last frame",
        frames,
        game.ticks(),
        game.world().blocks_remaining(),
        game.rounds_lost(),
        vertex_count
    );
}
