//! Dino Dash entry point
//!
//! On the web this binds the simulation to the page's DOM and drives it with
//! requestAnimationFrame. Natively it runs a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent, PointerEvent};

    use dino_dash::consts::GROUND_Y;
    use dino_dash::{GameState, GeometrySource, InputAction, RenderSink, Settings, present};

    fn element(document: &Document, id: &str) -> Option<HtmlElement> {
        let el = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if el.is_none() {
            log::error!("Missing #{} element", id);
        }
        el
    }

    /// DOM-backed play area: answers geometry queries and renders sim output
    struct DomView {
        document: Document,
        play_area: HtmlElement,
        player: HtmlElement,
        obstacles: HtmlElement,
        score: HtmlElement,
        game_over_panel: HtmlElement,
        final_score: HtmlElement,
        /// Obstacle id -> visual
        visuals: HashMap<u32, HtmlElement>,
    }

    impl DomView {
        fn bind(document: Document) -> Option<Self> {
            Some(Self {
                play_area: element(&document, "playArea")?,
                player: element(&document, "player")?,
                obstacles: element(&document, "obstacles")?,
                score: element(&document, "score")?,
                game_over_panel: element(&document, "gameOverPanel")?,
                final_score: element(&document, "finalScore")?,
                visuals: HashMap::new(),
                document,
            })
        }

        fn prepare(&self) {
            // Obstacle x is measured from the play area's left edge
            let _ = self.play_area.style().set_property("position", "relative");
            let container = self.obstacles.style();
            let _ = container.set_property("position", "absolute");
            let _ = container.set_property("inset", "0");
            let _ = self.player.style().set_property("position", "absolute");

            let _ = self.play_area.set_attribute("tabindex", "0");
            let _ = self.play_area.focus();
            self.score.set_title("Press Space or tap to start and jump");
        }

        fn create_visual(&mut self, id: u32) -> Option<HtmlElement> {
            let el = self
                .document
                .create_element("div")
                .ok()?
                .dyn_into::<HtmlElement>()
                .ok()?;
            el.set_class_name("obstacle cactus");
            let style = el.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("left", "0px");
            let _ = style.set_property("bottom", &format!("{}px", GROUND_Y));
            if let Err(e) = self.obstacles.append_child(&el) {
                log::warn!("Could not attach obstacle {}: {:?}", id, e);
                return None;
            }
            self.visuals.insert(id, el.clone());
            Some(el)
        }
    }

    impl GeometrySource for DomView {
        fn play_area_width(&self) -> f32 {
            self.play_area.client_width() as f32
        }

        fn play_area_height(&self) -> f32 {
            self.play_area.client_height() as f32
        }
    }

    impl RenderSink for DomView {
        fn player_moved(&mut self, x: f32, vertical_offset: f32, width: f32, height: f32) {
            let style = self.player.style();
            let _ = style.set_property("left", &format!("{}px", x));
            let _ = style.set_property("bottom", &format!("{}px", GROUND_Y + vertical_offset));
            let _ = style.set_property("width", &format!("{}px", width));
            let _ = style.set_property("height", &format!("{}px", height));
        }

        fn obstacle_moved(&mut self, id: u32, x: f32, width: f32, height: f32) {
            let el = match self.visuals.get(&id) {
                Some(el) => el.clone(),
                None => match self.create_visual(id) {
                    Some(el) => el,
                    None => return,
                },
            };
            let style = el.style();
            let _ = style.set_property("width", &format!("{}px", width));
            let _ = style.set_property("height", &format!("{}px", height));
            let _ = style.set_property("transform", &format!("translateX({}px)", x));
        }

        fn obstacle_removed(&mut self, id: u32) {
            if let Some(el) = self.visuals.remove(&id) {
                el.remove();
            }
        }

        fn score_changed(&mut self, score: u64) {
            self.score
                .set_text_content(Some(&format!("Score: {}", score)));
        }

        fn game_over(&mut self, final_score: u64) {
            self.final_score
                .set_text_content(Some(&final_score.to_string()));
            let _ = self.game_over_panel.class_list().remove_1("hidden");
            let _ = self.game_over_panel.set_attribute("aria-hidden", "false");
        }

        fn game_started(&mut self) {
            let _ = self.game_over_panel.class_list().add_1("hidden");
            let _ = self.game_over_panel.set_attribute("aria-hidden", "true");
            let _ = self.play_area.focus();
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        view: DomView,
        settings: Settings,
        /// A requestAnimationFrame callback is pending
        loop_active: bool,
    }

    impl Game {
        fn apply(&mut self, action: InputAction) {
            self.state.apply_input(action);
            self.flush();
        }

        /// Push pending events and positions into the DOM
        fn flush(&mut self) {
            let events = self.state.drain_events();
            present(&self.state, &events, &mut self.view);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dino Dash starting...");

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let settings = Settings::load();
        let seed = settings.seed_or(js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        let Some(view) = DomView::bind(document) else {
            log::error!("Page is missing game elements; not starting");
            return;
        };
        view.prepare();

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            view,
            settings,
            loop_active: false,
        }));
        game.borrow_mut().flush();

        setup_input_handlers(game.clone());
        setup_play_again_button(game.clone());
        expose_debug_api(game);

        log::info!("Dino Dash ready!");
    }

    /// Schedule the frame loop if a run is active and no loop is pending
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        let schedule = {
            let mut g = game.borrow_mut();
            if g.state.is_running() && !g.loop_active {
                g.loop_active = true;
                true
            } else {
                false
            }
        };
        if schedule {
            request_animation_frame(game.clone());
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let outcome = {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            let outcome = g.state.tick(time, &g.view);
            g.flush();
            if !outcome.should_continue() {
                g.loop_active = false;
            }
            outcome
        };

        if outcome.should_continue() {
            request_animation_frame(game);
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let action = game.borrow().settings.action_for_key(&event.code());
                if let Some(action) = action {
                    if action == InputAction::Jump {
                        event.prevent_default();
                    }
                    game.borrow_mut().apply(action);
                    ensure_loop(&game);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap / click on the play area
        {
            let play_area = game.borrow().view.play_area.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().apply(InputAction::Jump);
                ensure_loop(&game);
            });
            let _ = play_area
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_play_again_button(game: Rc<RefCell<Game>>) {
        let document = game.borrow().view.document.clone();

        if let Some(btn) = document.get_element_by_id("playAgainBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                game.borrow_mut().apply(InputAction::Restart);
                ensure_loop(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// `window.DinoGame = { startGame, endGame, getState }` for console debugging
    fn expose_debug_api(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let api = js_sys::Object::new();

        let start_game = {
            let game = game.clone();
            Closure::<dyn FnMut()>::new(move || {
                {
                    let mut g = game.borrow_mut();
                    g.state.start();
                    g.flush();
                }
                ensure_loop(&game);
            })
        };

        let end_game = {
            let game = game.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut g = game.borrow_mut();
                g.state.end();
                g.flush();
            })
        };

        let get_state = Closure::<dyn Fn() -> JsValue>::new(move || {
            let snapshot = game.borrow().state.snapshot();
            serde_json::to_string(&snapshot)
                .ok()
                .and_then(|json| js_sys::JSON::parse(&json).ok())
                .unwrap_or(JsValue::NULL)
        });

        let _ = js_sys::Reflect::set(&api, &JsValue::from_str("startGame"), start_game.as_ref());
        let _ = js_sys::Reflect::set(&api, &JsValue::from_str("endGame"), end_game.as_ref());
        let _ = js_sys::Reflect::set(&api, &JsValue::from_str("getState"), get_state.as_ref());
        let _ = js_sys::Reflect::set(&window, &JsValue::from_str("DinoGame"), &api);

        start_game.forget();
        end_game.forget();
        get_state.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let settings = dino_dash::Settings::load();
    let fallback = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let seed = settings.seed_or(fallback);

    let score = headless::run(seed);
    println!("Final score: {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use dino_dash::platform::LogSink;
    use dino_dash::{GameState, InputAction, PlayArea, present};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Two minutes of game time
    const MAX_FRAMES: u32 = 60 * 120;
    /// Jump when an obstacle is this many seconds from the player
    const JUMP_LEAD_SECS: f32 = 0.2;

    /// Play one run at 60 fps with a simple autopilot; returns the final score
    pub fn run(seed: u64) -> u64 {
        let area = PlayArea::default();
        let mut state = GameState::new(seed);
        let mut sink = LogSink::default();

        let mut now = 0.0;
        state.apply_input(InputAction::Jump);
        for _ in 0..MAX_FRAMES {
            if should_jump(&state) {
                state.apply_input(InputAction::Jump);
            }
            let outcome = state.tick(now, &area);
            let events = state.drain_events();
            present(&state, &events, &mut sink);
            if !outcome.should_continue() {
                break;
            }
            now += FRAME_MS;
        }

        if state.is_running() {
            log::info!("Autopilot survived the full demo");
        }
        sink.last_score
    }

    fn should_jump(state: &GameState) -> bool {
        let player = state.player();
        if !player.on_ground {
            return false;
        }
        let front = player.x + player.width;
        state
            .obstacles()
            .iter()
            .any(|o| o.x >= front && o.x - front < o.speed * JUMP_LEAD_SECS)
    }
}
