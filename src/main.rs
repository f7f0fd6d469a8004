//! Maze Ball entry point
//!
//! Browser build: canvas rendering, keyboard steering and a restart button.
//! Native build: prints a maze and rolls the ball headlessly for a moment.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

    use maze_ball::GameConfig;
    use maze_ball::game::{MazeSession, Runner, UiState};
    use maze_ball::physics::{Label, PhysicsWorld, Shape, SimWorld};

    type Session = MazeSession<SimWorld, rand_pcg::Pcg32>;

    /// Game instance holding all state
    struct Game {
        session: Session,
        runner: Runner,
        last_time: f64,
        /// UI state last pushed to the DOM
        shown_ui: Option<UiState>,
    }

    impl Game {
        fn new(session: Session) -> Self {
            Self {
                session,
                runner: Runner::new(),
                last_time: 0.0,
                shown_ui: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let outcome = self.runner.advance(&mut self.session, dt);
            if outcome.won {
                log::info!("Winner!");
            }
        }

        /// Draw every body
        fn render(&self, ctx: &CanvasRenderingContext2d) {
            let layout = self.session.layout();
            ctx.set_fill_style_str("#101018");
            ctx.fill_rect(0.0, 0.0, layout.width as f64, layout.height as f64);

            for body in self.session.world().bodies() {
                ctx.set_fill_style_str(match body.label {
                    Label::Ball => "blue",
                    Label::Goal => "green",
                    Label::Wall => "red",
                    Label::Border => "#888888",
                });
                let (x, y) = (body.pos.x as f64, body.pos.y as f64);
                match body.shape {
                    Shape::Rect { width, height } => {
                        let (w, h) = (width as f64, height as f64);
                        ctx.fill_rect(x - w / 2.0, y - h / 2.0, w, h);
                    }
                    Shape::Circle { radius } => {
                        ctx.begin_path();
                        if ctx
                            .arc(x, y, radius as f64, 0.0, std::f64::consts::TAU)
                            .is_ok()
                        {
                            ctx.fill();
                        }
                    }
                }
            }
        }

        /// Show or hide the winner banner and restart button
        fn sync_ui(&mut self, document: &Document) {
            let ui = self.session.ui();
            if self.shown_ui == Some(ui) {
                return;
            }
            set_hidden(document, ".winner", !ui.winner_visible);
            set_hidden(document, "#restart-btn", !ui.restart_visible);
            self.shown_ui = Some(ui);
        }
    }

    fn set_hidden(document: &Document, selector: &str, hidden: bool) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Maze Ball starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()
            .map_err(|_| js_err("#canvas is not a canvas"))?;

        // Maze fills the whole window
        let width = window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = window.inner_height()?.as_f64().unwrap_or(640.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| js_err("no 2d context"))?
            .dyn_into()
            .map_err(|_| js_err("not a 2d context"))?;

        let seed = js_sys::Date::now() as u64;
        let config = GameConfig::default()
            .with_viewport(width as f32, height as f32)
            .with_seed(seed);
        let world = SimWorld::from_config(&config);
        let session = MazeSession::from_config(config, world).map_err(js_err)?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game::new(session)));
        setup_input_handlers(&document, game.clone());
        setup_restart_button(&document, game.clone());
        request_animation_frame(game, Rc::new(ctx), document);

        log::info!("Maze Ball running!");
        Ok(())
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            #[allow(deprecated)]
            let handled = g.session.apply_key(event.key_code(), &event.key());
            if handled {
                event.prevent_default();
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                match g.session.restart() {
                    Ok(()) => log::info!("Game restarted"),
                    Err(e) => log::error!("Restart failed: {}", e),
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #restart-btn element; restart disabled");
        }
    }

    fn request_animation_frame(
        game: Rc<RefCell<Game>>,
        ctx: Rc<CanvasRenderingContext2d>,
        document: Document,
    ) {
        let Some(window) = web_sys::window() else {
            log::error!("Lost window; stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, ctx, document, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(
        game: Rc<RefCell<Game>>,
        ctx: Rc<CanvasRenderingContext2d>,
        document: Document,
        time: f64,
    ) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render(&ctx);
            g.sync_ui(&document);
        }

        request_animation_frame(game, ctx, document);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Maze Ball (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the playable web version");

    if let Err(e) = run_headless() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Print a maze, then push the ball towards the goal for two seconds
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> maze_ball::Result<()> {
    use maze_ball::GameConfig;
    use maze_ball::consts::SIM_DT;
    use maze_ball::game::{Control, MazeSession, Runner};
    use maze_ball::maze::Cell;
    use maze_ball::physics::SimWorld;

    let mut config = GameConfig::from_env();
    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(_) => log::warn!("Ignoring non-numeric seed argument {:?}", arg),
        }
    }

    let world = SimWorld::from_config(&config);
    let mut session = MazeSession::from_config(config, world)?;
    session.maze().verify()?;

    let goal = session.layout().goal_cell();
    println!(
        "{}",
        session
            .maze()
            .to_ascii_with_marks(&[(Cell::new(0, 0), 'o'), (goal, 'G')])
    );

    for _ in 0..3 {
        session.apply_control(Control::Right);
        session.apply_control(Control::Down);
    }
    let mut runner = Runner::new();
    let mut collisions = 0;
    for _ in 0..120 {
        collisions += runner.advance(&mut session, SIM_DT).collisions;
    }

    let cell = session
        .ball_position()
        .and_then(|pos| session.layout().cell_at(pos));
    match cell {
        Some(cell) => println!("Ball settled in cell {} after {} contacts", cell, collisions),
        None => println!("Ball left the field after {} contacts", collisions),
    }
    println!("Phase: {:?}", session.phase());
    Ok(())
}
