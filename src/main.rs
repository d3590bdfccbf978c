//! Flappy entry point
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

    use flappy::persistence::LocalStorageStore;
    use flappy::platform::{key_action, swallows_key};
    use flappy::renderer::{Frame, RenderState};
    use flappy::sim::{Action, GameEvent, GamePhase};
    use flappy::{Game, Tuning, Viewport};

    /// Everything the browser callbacks share
    struct App {
        game: Game<LocalStorageStore>,
        render_state: Option<RenderState>,
        frame: Frame,
        canvas: HtmlCanvasElement,
        /// Id of the pending requestAnimationFrame callback
        raf_id: Option<i32>,
    }

    type Shared = Rc<RefCell<App>>;
    /// The frame callback itself. Holding it here (instead of `forget`)
    /// lets `stop_loop` drop it.
    type RafSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    impl App {
        /// Present whatever the game wants on screen right now
        fn present(&mut self) {
            self.game.render(&mut self.frame);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.frame.vertices(), self.game.viewport()) {
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

        /// Match canvas, surface and viewport to the canvas' CSS size
        fn fit_canvas(&mut self) {
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

            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
            self.game
                .resize(Viewport::new(client_w as f32, client_h as f32));
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy starting...");

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

        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let store = LocalStorageStore::new();
        let tuning = Tuning::load(&store);
        let viewport = Viewport::new(client_w as f32, client_h as f32);
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, tuning, viewport, store);
        log::info!("Game initialized with seed: {}, best: {}", seed, game.best());

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

        let render_state = RenderState::new(surface, &adapter, width, height).await;

        let app = Rc::new(RefCell::new(App {
            game,
            render_state: Some(render_state),
            frame: Frame::new(),
            canvas: canvas.clone(),
            raf_id: None,
        }));
        let raf: RafSlot = Rc::new(RefCell::new(None));

        app.borrow_mut().present();

        setup_input_handlers(&canvas, app.clone());
        setup_resize(app.clone());
        setup_visibility(app.clone(), raf.clone());

        start_loop(&app, &raf);

        log::info!("Flappy running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Shared) {
        // Keyboard
        {
            let app = app.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if swallows_key(&key) {
                    event.prevent_default();
                }
                if event.repeat() {
                    return;
                }
                if let Some(action) = key_action(&key) {
                    app.borrow_mut().game.push_action(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.push_action(Action::Impulse);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.push_action(Action::Impulse);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Shared) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            a.fit_canvas();
            // Nothing else will redraw before the first run starts
            if a.game.phase() == GamePhase::Idle {
                a.present();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop the loop while the tab is hidden, pausing a live run first
    fn setup_visibility(app: Shared, raf: RafSlot) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.hidden() {
                {
                    let mut a = app.borrow_mut();
                    if a.game.phase() == GamePhase::Running {
                        a.game.push_action(Action::TogglePause);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
                stop_loop(&app, &raf);
            } else {
                start_loop(&app, &raf);
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn start_loop(app: &Shared, raf: &RafSlot) {
        if raf.borrow().is_some() {
            return;
        }
        app.borrow_mut().game.start_driver(now_ms());

        let cb_app = app.clone();
        let cb_raf = raf.clone();
        *raf.borrow_mut() = Some(Closure::new(move |time: f64| {
            game_loop(&cb_app, time);
            request_animation_frame(&cb_app, &cb_raf);
        }));
        request_animation_frame(app, raf);
    }

    /// Cancel the pending callback and drop the closure
    fn stop_loop(app: &Shared, raf: &RafSlot) {
        let mut a = app.borrow_mut();
        if let Some(id) = a.raf_id.take()
            && let Some(window) = web_sys::window()
        {
            let _ = window.cancel_animation_frame(id);
        }
        a.game.cancel_driver();
        drop(a);
        raf.borrow_mut().take();
    }

    fn request_animation_frame(app: &Shared, raf: &RafSlot) {
        let slot = raf.borrow();
        let (Some(closure), Some(window)) = (slot.as_ref(), web_sys::window()) else {
            return;
        };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => app.borrow_mut().raf_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn game_loop(app: &Shared, time: f64) {
        let mut a = app.borrow_mut();
        for event in a.game.frame(time) {
            match event {
                GameEvent::Crashed { score, .. } if score > 0 && score >= a.game.best() => {
                    log::info!("New best: {}", score);
                }
                other => log::debug!("{:?}", other),
            }
        }
        a.present();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy::persistence::FileStore;
    use flappy::platform::native::run_headless;
    use flappy::{Game, Tuning, Viewport};

    /// About five minutes of play at 60 Hz
    const MAX_FRAMES: u32 = 18_000;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flappy (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let store = FileStore::new("flappy_store.json");
    let tuning = Tuning::load(&store);
    let mut game = Game::new(seed, tuning, Viewport::default(), store);
    log::info!("Game initialized with seed: {}, best: {}", seed, game.best());

    run_headless(&mut game, MAX_FRAMES);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
