//! Maze Roll entry point
//!
//! Web: builds the maze into a Matter.js world and runs the game loop.
//! Native: prints a generated maze to the terminal.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;

    use maze_roll::{Difficulty, Settings};
    use maze_roll::layout::{BodyLabel, WorldRect};
    use maze_roll::physics::PhysicsWorld;
    use maze_roll::sim::{Game, GameEvent, TickInput, key_to_direction, tick};

    // Matter.js bindings. Bodies live in a JS array, Rust refers to them by index.
    #[wasm_bindgen(inline_js = "
        let engine = null;
        let bodies = [];

        export function matter_create(selector, width, height, wireframes) {
            const { Engine, Render, Runner } = Matter;
            engine = Engine.create();
            const render = Render.create({
                element: document.querySelector(selector),
                engine: engine,
                options: { wireframes: wireframes, width: width, height: height },
            });
            Render.run(render);
            Runner.run(Runner.create(), engine);
        }

        export function matter_add_rect(x, y, w, h, label, is_static) {
            const options = { isStatic: is_static, label: label };
            if (label === 'goal') {
                options.render = { fillStyle: 'green', strokeStyle: 'green', lineWidth: 3 };
            }
            const body = Matter.Bodies.rectangle(x, y, w, h, options);
            Matter.World.add(engine.world, body);
            bodies.push(body);
            return bodies.length - 1;
        }

        export function matter_add_circle(x, y, r, label) {
            const body = Matter.Bodies.circle(x, y, r, { label: label });
            Matter.World.add(engine.world, body);
            bodies.push(body);
            return bodies.length - 1;
        }

        export function matter_velocity_x(id) { return bodies[id].velocity.x; }
        export function matter_velocity_y(id) { return bodies[id].velocity.y; }

        export function matter_set_velocity(id, x, y) {
            Matter.Body.setVelocity(bodies[id], { x: x, y: y });
        }

        export function matter_set_gravity(x, y) {
            engine.world.gravity.x = x;
            engine.world.gravity.y = y;
        }

        export function matter_set_static(id, is_static) {
            Matter.Body.setStatic(bodies[id], is_static);
        }

        export function matter_clear() {
            Matter.World.clear(engine.world, false);
            bodies = [];
        }

        export function matter_on_collision_start(callback) {
            Matter.Events.on(engine, 'collisionStart', (event) => {
                for (const pair of event.pairs) {
                    callback(pair.bodyA.label, pair.bodyB.label);
                }
            });
        }
    ")]
    extern "C" {
        fn matter_create(selector: &str, width: f32, height: f32, wireframes: bool);
        fn matter_add_rect(x: f32, y: f32, w: f32, h: f32, label: &str, is_static: bool) -> u32;
        fn matter_add_circle(x: f32, y: f32, r: f32, label: &str) -> u32;
        fn matter_velocity_x(id: u32) -> f32;
        fn matter_velocity_y(id: u32) -> f32;
        fn matter_set_velocity(id: u32, x: f32, y: f32);
        fn matter_set_gravity(x: f32, y: f32);
        fn matter_set_static(id: u32, is_static: bool);
        fn matter_clear();
        fn matter_on_collision_start(callback: &Closure<dyn FnMut(String, String)>);
    }

    /// Matter.js world; state lives on the JS side
    struct MatterWorld;

    impl PhysicsWorld for MatterWorld {
        type Handle = u32;

        fn add_rect(&mut self, rect: &WorldRect, label: BodyLabel, is_static: bool) -> u32 {
            matter_add_rect(
                rect.center.x,
                rect.center.y,
                rect.size.x,
                rect.size.y,
                label.as_str(),
                is_static,
            )
        }

        fn add_circle(&mut self, center: Vec2, radius: f32, label: BodyLabel) -> u32 {
            matter_add_circle(center.x, center.y, radius, label.as_str())
        }

        fn velocity(&self, body: u32) -> Vec2 {
            Vec2::new(matter_velocity_x(body), matter_velocity_y(body))
        }

        fn set_velocity(&mut self, body: u32, velocity: Vec2) {
            matter_set_velocity(body, velocity.x, velocity.y);
        }

        fn set_gravity(&mut self, gravity: Vec2) {
            matter_set_gravity(gravity.x, gravity.y);
        }

        fn set_static(&mut self, body: u32, is_static: bool) {
            matter_set_static(body, is_static);
        }

        fn clear(&mut self) {
            matter_clear();
        }
    }

    /// Game instance plus the input queued since the last frame
    struct App {
        game: Game<MatterWorld>,
        settings: Settings,
        input: TickInput,
    }

    impl App {
        fn update(&mut self) {
            if self.input.is_empty() {
                return;
            }
            let input = self.input.take();
            if let Some(GameEvent::Won) = tick(&mut self.game, &input) {
                show_winner(true);
            }
        }

        fn restart(&mut self) {
            let seed = pick_seed(&self.settings);
            match self.game.restart(&self.settings, seed) {
                Ok(()) => {
                    self.input = TickInput::default();
                    show_winner(false);
                }
                Err(e) => log::error!("Restart failed: {}", e),
            }
        }

        /// Switch grid preset, remember it, and start a fresh maze
        fn select_preset(&mut self, preset: Difficulty) {
            log::info!("Difficulty: {}", preset.as_str());
            self.settings.apply_preset(preset);
            self.settings.save();
            self.restart();
        }
    }

    fn pick_seed(settings: &Settings) -> u64 {
        settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64)
    }

    fn show_winner(visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.query_selector(".winner").ok().flatten() {
            let classes = el.class_list();
            let _ = if visible {
                classes.remove_1("hidden")
            } else {
                classes.add_1("hidden")
            };
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Maze Roll starting...");

        let settings = Settings::load();
        matter_create(".container", settings.width, settings.height, settings.wireframes);

        let seed = pick_seed(&settings);
        let game = match Game::new(&settings, MatterWorld, seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Could not start game: {}", e);
                return;
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            settings,
            input: TickInput::default(),
        }));

        setup_collision_handler(app.clone());
        setup_input_handlers(app.clone());

        request_animation_frame(app);

        log::info!("Maze Roll running!");
    }

    fn setup_collision_handler(app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(String, String)>::new(move |a: String, b: String| {
            if let (Some(a), Some(b)) = (BodyLabel::from_str(&a), BodyLabel::from_str(&b)) {
                app.borrow_mut().input.collisions.push((a, b));
            }
        });
        matter_on_collision_start(&closure);
        closure.forget();
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            let mut app = app.borrow_mut();
            if let Some(dir) = key_to_direction(&key) {
                event.prevent_default();
                app.input.nudges.push(dir);
            } else if key == "r" || key == "R" {
                app.restart();
            } else if let Some(preset) = Difficulty::from_key(&key) {
                app.select_preset(preset);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            app.borrow_mut().update();
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Print a randomly generated perfect maze", long_about = None)]
struct Args {
    /// Grid rows
    #[arg(default_value_t = maze_roll::consts::DEFAULT_ROWS)]
    rows: usize,
    /// Grid columns
    #[arg(default_value_t = maze_roll::consts::DEFAULT_COLUMNS)]
    columns: usize,
    /// Random seed (fresh each run if omitted)
    seed: Option<u64>,
    /// Print the maze as JSON instead of ASCII
    #[arg(long)]
    json: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;
    use maze_roll::sim::RngState;
    use std::process::ExitCode;

    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = RngState::new(seed).to_rng();
    let maze = match maze_roll::generate(args.rows, args.columns, &mut rng) {
        Ok(maze) => maze,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&maze) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    print!("{maze}");
    let path_len = maze
        .solve(maze.entry(), maze.goal())
        .map(|p| p.len())
        .unwrap_or(0);
    println!("seed: {seed}  start: ({}, {})  solution: {path_len} cells", maze.start().row, maze.start().col);
    ExitCode::SUCCESS
}
