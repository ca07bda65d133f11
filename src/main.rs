//! Maze Ball entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use maze_ball::consts::*;
    use maze_ball::maze::Direction;
    use maze_ball::settings::Settings;
    use maze_ball::sim::{BodyLabel, GameEvent, GameState, Shape, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        accumulator: f32,
        last_time: f64,
        /// Key presses since the last tick
        input: TickInput,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Presses are consumed by the tick that applies them
                self.input = TickInput::default();
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::Won => show_winner(),
                    GameEvent::CollisionStart { a, b } => {
                        log::trace!("Collision start: {:?} / {:?}", a, b);
                    }
                }
            }
        }

        /// Draw every body as a filled shape
        fn render(&self) {
            let ctx = &self.ctx;
            let layout = &self.state.layout;
            ctx.clear_rect(0.0, 0.0, layout.width as f64, layout.height as f64);

            for body in &self.state.bodies {
                let color = match body.label {
                    BodyLabel::Wall | BodyLabel::Boundary => &self.settings.wall_color,
                    BodyLabel::Goal => &self.settings.goal_color,
                    BodyLabel::Ball => &self.settings.ball_color,
                };
                ctx.set_fill_style_str(color);

                match body.shape {
                    Shape::Rect { half } => {
                        let min = body.pos - half;
                        ctx.fill_rect(
                            min.x as f64,
                            min.y as f64,
                            (half.x * 2.0) as f64,
                            (half.y * 2.0) as f64,
                        );
                    }
                    Shape::Circle { radius } => {
                        ctx.begin_path();
                        if ctx
                            .arc(body.pos.x as f64, body.pos.y as f64, radius as f64, 0.0, TAU)
                            .is_ok()
                        {
                            ctx.fill();
                        }
                    }
                }
            }
        }
    }

    /// Remove `hidden` from the `.winner` banner
    fn show_winner() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.query_selector(".winner").ok().flatten() {
            let _ = el.class_list().remove_1("hidden");
        }
        log::info!("Maze solved!");
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Maze Ball starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = match document.get_element_by_id("canvas") {
            Some(el) => el.dyn_into()?,
            None => {
                let el: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
                document.body().ok_or("no body")?.append_child(&el)?;
                el
            }
        };

        // The play area fills the window
        let width = window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = window.inner_height()?.as_f64().unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let settings = Settings::load();
        // Persist so the stored blob always reflects what is being played
        settings.save();
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(&settings, width as f32, height as f32, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            settings,
            ctx,
            accumulator: 0.0,
            last_time: 0.0,
            input: TickInput::default(),
        }));

        setup_input_handlers(&window, game.clone());
        request_animation_frame(game);

        log::info!("Maze Ball running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "w" | "W" => g.input.press(Direction::Up),
                "d" | "D" => g.input.press(Direction::Right),
                "s" | "S" => g.input.press(Direction::Down),
                "a" | "A" => g.input.press(Direction::Left),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Play area used when laying out a maze from the command line
#[cfg(not(target_arch = "wasm32"))]
const NATIVE_AREA: (f32, f32) = (800.0, 600.0);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Maze Ball (native) starting...");

    if let Err(e) = run_native(std::env::args().skip(1)) {
        eprintln!("maze-ball: {e}");
        std::process::exit(1);
    }
}

/// `maze-ball [preset] [seed] [--json]`
#[cfg(not(target_arch = "wasm32"))]
fn run_native(args: impl Iterator<Item = String>) -> maze_ball::Result<()> {
    use maze_ball::sim::GameState;
    use maze_ball::{MazeError, MazePreset, Settings};

    let mut settings = Settings::load();
    let mut seed = None;
    let mut json = false;

    for arg in args {
        if arg == "--json" {
            json = true;
        } else if let Some(preset) = MazePreset::from_str(&arg) {
            settings.apply_preset(preset);
        } else if let Ok(value) = arg.parse::<u64>() {
            seed = Some(value);
        } else {
            return Err(MazeError::InvalidSettings(format!(
                "unrecognised argument `{arg}` (expected small|classic|large, a seed or --json)"
            )));
        }
    }

    let seed = seed.or(settings.seed).unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    });

    settings.seed = Some(seed);

    let (width, height) = NATIVE_AREA;
    let state = GameState::new(&settings, width, height, seed)?;

    if json {
        let out = serde_json::json!({
            "seed": seed,
            "traversal": settings.traversal.as_str(),
            "maze": state.maze,
            "layout": state.layout,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "{} maze {}x{} (seed {}, {} walls)",
            settings.preset.as_str(),
            state.maze.cols(),
            state.maze.rows(),
            seed,
            state.layout.walls.len()
        );
        println!("{}", state.maze);
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
