//! Arcade Trio entry point
//!
//! On the web this drives a session from `requestAnimationFrame` and draws
//! onto a 2D canvas. Natively it runs a headless session with scripted
//! input and logs the HUD, which is handy for soak-testing the simulation.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use arcade_trio::persistence::LocalStore;
    use arcade_trio::platform::clock::FrameClock;
    use arcade_trio::platform::input::KeySet;
    use arcade_trio::racing::CarModel;
    use arcade_trio::render::{Align, Canvas, Color};
    use arcade_trio::{GameKind, Session, Settings};

    /// `Canvas` over the browser's 2D context
    struct Canvas2d {
        ctx: CanvasRenderingContext2d,
        size: Vec2,
    }

    impl Canvas2d {
        fn path_circle(&self, center: Vec2, radius: f32) {
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            );
        }
    }

    impl Canvas for Canvas2d {
        fn clear(&mut self, color: Color) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx
                .fill_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
        }

        fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx
                .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
        }

        fn stroke_rect(&mut self, min: Vec2, size: Vec2, width: f32, color: Color) {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(width as f64);
            self.ctx
                .stroke_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.path_circle(center, radius);
            self.ctx.fill();
        }

        fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(width as f64);
            self.ctx.begin_path();
            self.ctx.move_to(from.x as f64, from.y as f64);
            self.ctx.line_to(to.x as f64, to.y as f64);
            self.ctx.stroke();
        }

        fn text(&mut self, pos: Vec2, text: &str, size: f32, align: Align, color: Color) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.set_font(&format!("bold {}px Arial", size.round()));
            self.ctx.set_text_align(match align {
                Align::Left => "left",
                Align::Center => "center",
                Align::Right => "right",
            });
            self.ctx.set_text_baseline("middle");
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }

        fn set_alpha(&mut self, alpha: f32) {
            self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        }

        fn set_additive(&mut self, additive: bool) {
            let op = if additive { "lighter" } else { "source-over" };
            let _ = self.ctx.set_global_composite_operation(op);
        }

        fn save(&mut self) {
            self.ctx.save();
        }

        fn restore(&mut self) {
            self.ctx.restore();
        }

        fn translate(&mut self, offset: Vec2) {
            let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
        }

        fn rotate(&mut self, angle: f32) {
            let _ = self.ctx.rotate(angle as f64);
        }
    }

    /// Everything the browser loop owns
    struct Game {
        session: Session,
        keys: KeySet,
        clock: FrameClock,
        store: LocalStore,
        canvas: Canvas2d,
        document: Document,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let ticks = self.clock.advance(time);
            for _ in 0..ticks {
                self.session.tick(&mut self.keys, &mut self.store);
            }
            for event in self.session.drain_events() {
                log::debug!("{:?}", event);
            }
            self.session.draw(&mut self.canvas);
            self.update_hud();
        }

        /// Write HUD text into the matching DOM elements
        fn update_hud(&self) {
            for line in self.session.hud() {
                if let Some(el) = self.document.get_element_by_id(line.id) {
                    if el.text_content().as_deref() != Some(line.text.as_str()) {
                        el.set_text_content(Some(&line.text));
                    }
                }
            }
            if let Some(el) = self.document.get_element_by_id("fps") {
                el.set_text_content(Some(&self.clock.fps().to_string()));
            }
        }
    }

    /// Game name from `?game=...`, then the canvas `data-game` attribute
    fn requested_game(canvas: &HtmlCanvasElement) -> GameKind {
        let from_query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| {
                search
                    .trim_start_matches('?')
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("game=").map(str::to_string))
            });
        match from_query.or_else(|| canvas.get_attribute("data-game")) {
            Some(name) => GameKind::from_key(&name),
            None => GameKind::Racing,
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Arcade Trio starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"canvas\"> element");
            return;
        };

        let kind = requested_game(&canvas);
        let (width, height) = kind.canvas_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("2D canvas context unavailable");
            return;
        };

        let mut store = LocalStore::open();
        let settings = Settings::load(&store);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let session = Session::new(kind, seed, &settings, &store);
        // Write back so a first run leaves editable defaults behind
        settings.save(&mut store);

        let game = Rc::new(RefCell::new(Game {
            session,
            keys: KeySet::new(),
            clock: FrameClock::new(),
            store,
            canvas: Canvas2d {
                ctx,
                size: Vec2::new(width as f32, height as f32),
            },
            document: document.clone(),
        }));

        setup_input_handlers(&window, &document, game.clone());
        setup_visibility(&document, game.clone());

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(game);
        log::info!("Arcade Trio running {}", kind.key());
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                // Keep arrows and space from scrolling the page
                if matches!(
                    key.as_str(),
                    "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | " "
                ) {
                    event.prevent_default();
                }
                game.borrow_mut().keys.press_dom(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.release_dom(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clicks: start screens, plus the racer's model and color pickers
        // (`data-model="drifter"`, `data-color="#e74c3c"`)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let target = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok());
                let model = target
                    .as_ref()
                    .and_then(|el| el.get_attribute("data-model"))
                    .map(|key| CarModel::from_key(&key));
                let color = target
                    .as_ref()
                    .and_then(|el| el.get_attribute("data-color"))
                    .and_then(|css| Color::from_css(&css));
                if model.is_some() || color.is_some() {
                    if g.session.select_car(model, color) {
                        log::info!("Car selection: {:?} {:?}", model, color);
                    }
                } else {
                    g.keys.click();
                }
            });
            let _ = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_visibility(document: &Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.hidden() {
                let mut g = game.borrow_mut();
                // Held keys never see their keyup while hidden
                g.keys.clear();
                g.clock.reset();
                log::info!("Tab hidden, input cleared");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let kind = args
        .next()
        .map(|name| arcade_trio::GameKind::from_key(&name))
        .unwrap_or(arcade_trio::GameKind::Racing);
    let ticks = match args.next().map(|t| t.parse::<u32>()) {
        Some(Ok(t)) => t,
        Some(Err(e)) => {
            log::warn!("Bad tick count ({}), using 3600", e);
            3600
        }
        None => 3600,
    };

    headless::run(kind, ticks);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Native runner: scripted input, HUD logged once per simulated second
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use arcade_trio::persistence::{KeyValueStore, MemoryStore};
    use arcade_trio::platform::input::{Key, KeySet};
    use arcade_trio::render::CommandRecorder;
    use arcade_trio::{BestTime, GameKind, Session, Settings};

    /// Keys held on `tick` for a crude autopilot
    fn script(kind: GameKind, tick: u32) -> KeySet {
        let phase = (tick / 90) % 4;
        match kind {
            GameKind::Racing => {
                let mut keys = vec![Key::Enter, Key::Up];
                if phase == 1 {
                    keys.push(Key::Right);
                }
                if tick % 600 < 60 {
                    keys.push(Key::CapsLock);
                }
                KeySet::with(&keys)
            }
            GameKind::Shooter => {
                let side = if phase % 2 == 0 { Key::Left } else { Key::Right };
                KeySet::with(&[Key::Space, side, Key::Enter])
            }
            GameKind::Soccer => {
                let mut keys = vec![Key::Right, Key::Enter];
                if phase == 2 {
                    keys.push(Key::Up);
                }
                if tick % 20 < 10 {
                    keys.push(Key::Space);
                }
                KeySet::with(&keys)
            }
        }
    }

    pub fn run(kind: GameKind, ticks: u32) {
        let settings = Settings::default();
        let mut store = MemoryStore::new();
        let seed = settings.seed.unwrap_or(0x5eed);
        let mut session = Session::new(kind, seed, &settings, &store);
        log::info!("Headless {} for {} ticks", kind.key(), ticks);

        for t in 0..ticks {
            let mut keys = script(kind, t);
            session.tick(&mut keys, &mut store);
            for event in session.drain_events() {
                log::debug!("[{}] {:?}", t, event);
            }
            if t % 60 == 59 {
                let hud: Vec<String> = session
                    .hud()
                    .into_iter()
                    .map(|line| format!("{}={}", line.id, line.text))
                    .collect();
                log::info!("[{}] {}", t + 1, hud.join(" "));
            }
        }

        let mut recorder = CommandRecorder::new();
        session.draw(&mut recorder);
        log::info!(
            "Final frame: {} draw calls, texts {:?}",
            recorder.commands.len(),
            recorder.texts()
        );
        if let Some(best) = store.get(BestTime::STORAGE_KEY) {
            log::info!("Stored best time: {}", best);
        }
    }
}
