//! Gapwing entry point
//!
//! The browser build wires the game loop to the page; the native build runs
//! a headless autopilot game and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, Window};

    use gapwing::highscores::LocalStorageStore;
    use gapwing::renderer::RenderState;
    use gapwing::sim::seeded;
    use gapwing::{FrameScheduler, Game, GameLoop, HighScore, Hud, RenderError, Tuning};

    #[derive(Debug, thiserror::Error)]
    pub enum SetupError {
        #[error("no window or document")]
        NoDocument,
        #[error("missing page element #{0}")]
        MissingElement(&'static str),
        #[error("#{0} is not a canvas")]
        NotCanvas(&'static str),
        #[error(transparent)]
        Render(#[from] RenderError),
        #[error(transparent)]
        Config(#[from] gapwing::ConfigError),
    }

    type App = GameLoop<RafScheduler>;

    /// Score text and start screen in the page
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    impl Hud for DomHud {
        fn show_score(&mut self, score: u32) {
            self.set_text("score", &format!("Score: {}", score));
        }

        fn show_high_score(&mut self, best: u32) {
            self.set_text("highScore", &format!("High Score: {}", best));
        }

        fn show_start_prompt(&mut self, visible: bool) {
            let screen = self
                .document
                .get_element_by_id("startScreen")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(screen) = screen {
                let display = if visible { "block" } else { "none" };
                let _ = screen.style().set_property("display", display);
            }
        }
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// `requestAnimationFrame` bound to one long-lived callback
    struct RafScheduler {
        window: Window,
        callback: FrameCallback,
    }

    impl FrameScheduler for RafScheduler {
        type Handle = i32;

        fn request_frame(&mut self) -> Option<i32> {
            let slot = self.callback.borrow();
            let callback = slot.as_ref()?;
            self.window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .ok()
        }

        fn cancel_frame(&mut self, handle: i32) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    pub async fn run() -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoDocument)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or(SetupError::MissingElement("gameCanvas"))?
            .dyn_into()
            .map_err(|_| SetupError::NotCanvas("gameCanvas"))?;

        let tuning = Tuning::load();
        let width = tuning.field_width as u32;
        let height = tuning.field_height as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(RenderError::from)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderError::from)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let field = Vec2::new(tuning.field_width, tuning.field_height);
        let render_state = RenderState::new(surface, &adapter, width, height, field).await?;

        let store = LocalStorageStore::new();
        let high_score = HighScore::load_from(&store);

        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        let game = Game::new(tuning, seeded(seed), high_score)?;

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window: window.clone(),
            callback: callback.clone(),
        };

        let app: Rc<RefCell<App>> = Rc::new(RefCell::new(GameLoop::new(
            game,
            scheduler,
            Box::new(DomHud {
                document: document.clone(),
            }),
            Box::new(store),
            Box::new(render_state),
        )));

        {
            let app = app.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                app.borrow_mut().on_frame();
            }));
        }

        setup_input_handlers(&document, &canvas, app)?;

        log::info!("Gapwing ready");
        Ok(())
    }

    fn setup_input_handlers(
        document: &Document,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), SetupError> {
        // Any key or touch flaps
        for event in ["keydown", "touchstart"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().impulse();
            });
            let _ = document
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Canvas click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().impulse();
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Start button
        let button = document
            .get_element_by_id("startButton")
            .ok_or(SetupError::MissingElement("startButton"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            app.borrow_mut().start();
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
    }

    log::info!("Gapwing starting...");
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let options = match native::Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: gapwing [--seed <n>] [--tuning <file.json>] [--frames <n>]");
            std::process::exit(1);
        }
    };

    if let Err(e) = native::run(&options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gapwing::renderer::HeadlessTarget;
    use gapwing::sim::{GameState, seeded};
    use gapwing::{ConfigError, Game, GameLoop, HighScore, LogHud, ManualScheduler, MemoryStore, Tuning};

    pub struct Options {
        pub seed: u64,
        pub tuning: Option<String>,
        pub max_frames: u64,
    }

    impl Options {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut options = Options {
                seed: 1,
                tuning: None,
                max_frames: 20_000,
            };
            while let Some(arg) = args.next() {
                let mut value = || args.next().ok_or(format!("{} requires a value", arg));
                match arg.as_str() {
                    "--seed" => {
                        options.seed = value()?.parse::<u64>().map_err(|e| format!("--seed: {}", e))?
                    }
                    "--tuning" => options.tuning = Some(value()?),
                    "--frames" => {
                        options.max_frames =
                            value()?.parse::<u64>().map_err(|e| format!("--frames: {}", e))?
                    }
                    other => return Err(format!("unknown argument {:?}", other)),
                }
            }
            Ok(options)
        }
    }

    #[derive(Debug, thiserror::Error)]
    pub enum RunError {
        #[error("cannot read tuning file {path}: {source}")]
        Read {
            path: String,
            source: std::io::Error,
        },
        #[error(transparent)]
        Config(#[from] ConfigError),
    }

    pub fn run(options: &Options) -> Result<(), RunError> {
        let tuning = match &options.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| RunError::Read {
                    path: path.clone(),
                    source,
                })?;
                Tuning::from_json(&json)?
            }
            None => Tuning::default(),
        };

        log::info!("Gapwing (native) headless run, seed {}", options.seed);

        let store = Rc::new(RefCell::new(MemoryStore::default()));
        let target = Rc::new(RefCell::new(HeadlessTarget::default()));
        let game = Game::new(tuning, seeded(options.seed), HighScore::load_from(&store))?;
        let mut game_loop = GameLoop::new(
            game,
            ManualScheduler::new(),
            Box::new(LogHud),
            Box::new(store.clone()),
            Box::new(target.clone()),
        );

        game_loop.start();
        while game_loop.frames() < options.max_frames && game_loop.scheduler_mut().fire().is_some()
        {
            let game = game_loop.game();
            if should_flap(game.state(), game.tuning()) {
                game_loop.impulse();
            }
            game_loop.on_frame();
        }

        let state = game_loop.game().state();
        log::info!(
            "Run ended in {:?} after {} frames: score {}, best {}, {} frames drawn",
            state.phase,
            game_loop.frames(),
            state.score,
            state.high_score.best(),
            target.borrow().frames
        );
        println!("score {} in {} frames", state.score, game_loop.frames());
        Ok(())
    }

    /// Flap when falling below the middle of the next gap
    fn should_flap(state: &GameState, tuning: &Tuning) -> bool {
        let bird = &state.bird;
        let left = bird.pos.x - bird.width / 2.0;
        let target = state
            .obstacles
            .iter()
            .filter(|o| o.right() >= left)
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .map(|o| o.gap_top + o.gap_size * 0.6)
            .unwrap_or(tuning.field_height / 2.0);
        bird.vel >= 0.0 && bird.pos.y > target
    }

}
