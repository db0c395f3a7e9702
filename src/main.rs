//! Ledge Runner entry point
//!
//! Web: wires the canvas, input listeners and game buttons to the arcade shell.
//! Native: runs a scripted headless session through the same frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use ledge_runner::platform::{FrameHandle, FrameSource, InputState};
    use ledge_runner::renderer::CanvasSurface;
    use ledge_runner::shell::Game;
    use ledge_runner::sim::{GameState, LevelLayout};
    use ledge_runner::{Arcade, GameKind, Platformer, Tuning, Viewport};

    /// `requestAnimationFrame` as a frame source
    struct WebFrames {
        window: web_sys::Window,
        callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    }

    impl FrameSource for WebFrames {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            let callback = self.callback.borrow();
            let closure = callback.as_ref()?;
            match self
                .window
                .request_animation_frame(closure.as_ref().unchecked_ref())
            {
                Ok(id) => Some(FrameHandle(id)),
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    None
                }
            }
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if let Err(e) = self.window.cancel_animation_frame(handle.0) {
                log::error!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    type SharedArcade = Rc<RefCell<Arcade<WebFrames>>>;

    /// Everything needed to build a fresh game
    #[derive(Clone)]
    struct Launcher {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        input: Rc<RefCell<InputState>>,
        tuning: Tuning,
        layout: LevelLayout,
    }

    impl Launcher {
        fn viewport(&self) -> Viewport {
            Viewport {
                width: self.canvas.width() as f32,
                height: self.canvas.height() as f32,
            }
        }

        fn build(&self, kind: GameKind) -> Option<Box<dyn Game>> {
            match kind {
                GameKind::Platformer => {
                    let viewport = self.viewport();
                    let state =
                        GameState::new(self.tuning.clone(), self.layout.clone(), viewport);
                    let surface =
                        CanvasSurface::new(self.ctx.clone(), viewport.width, viewport.height);
                    Some(Box::new(Platformer::new(
                        state,
                        Rc::clone(&self.input),
                        surface,
                    )))
                }
                other => {
                    log::warn!("{} is not available in this build", other.name());
                    None
                }
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Ledge Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            if let Err(e) = loading.set_attribute("class", "hidden") {
                log::warn!("Could not hide loading indicator: {:?}", e);
            }
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        fit_canvas(&canvas);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into()?;

        let launcher = Launcher {
            canvas: canvas.clone(),
            ctx,
            input: Rc::new(RefCell::new(InputState::new())),
            tuning: read_config(&document, "tuning", Tuning::from_json).unwrap_or_default(),
            layout: read_config(&document, "level", LevelLayout::from_json)
                .unwrap_or_else(LevelLayout::classic),
        };

        let callback = Rc::new(RefCell::new(None));
        let arcade: SharedArcade = Rc::new(RefCell::new(Arcade::new(WebFrames {
            window: window.clone(),
            callback: Rc::clone(&callback),
        })));
        {
            let arcade = Rc::clone(&arcade);
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                arcade.borrow_mut().on_frame(time);
            }));
        }

        setup_input_handlers(&window, &canvas, &launcher.input)?;
        setup_game_buttons(&document, &arcade, &launcher)?;
        setup_resize(&window, &arcade, &launcher)?;
        setup_auto_pause(&window, &document, &arcade)?;

        if let Some(game) = launcher.build(GameKind::Platformer) {
            arcade.borrow_mut().load(game);
        }

        log::info!("Ledge Runner running!");
        Ok(())
    }

    /// Match the drawing buffer to the element's layout size
    fn fit_canvas(canvas: &HtmlCanvasElement) {
        let w = canvas.client_width();
        let h = canvas.client_height();
        if w > 0 && h > 0 {
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
        }
    }

    /// Optional JSON override embedded as `<script id=... type="application/json">`
    fn read_config<T, E: std::fmt::Display>(
        document: &web_sys::Document,
        id: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> Option<T> {
        let text = document.get_element_by_id(id)?.text_content()?;
        match parse(&text) {
            Ok(value) => {
                log::info!("Loaded {} override", id);
                Some(value)
            }
            Err(e) => {
                log::warn!("Ignoring #{}: {}", id, e);
                None
            }
        }
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        input: &Rc<RefCell<InputState>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let input = Rc::clone(input);
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if matches!(key.as_str(), "ArrowLeft" | "ArrowRight" | "ArrowUp" | " ") {
                    event.prevent_default();
                }
                input.borrow_mut().key_down(&key, event.repeat());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let input = Rc::clone(input);
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                input.borrow_mut().key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start: zone of the first touch
        {
            let input = Rc::clone(input);
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    input
                        .borrow_mut()
                        .touch_start(x, y, rect.width() as f32, rect.height() as f32);
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let input = Rc::clone(input);
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                input.borrow_mut().touch_end();
            });
            canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// `.game-btn` elements carry the game name in `data-game`
    fn setup_game_buttons(
        document: &web_sys::Document,
        arcade: &SharedArcade,
        launcher: &Launcher,
    ) -> Result<(), JsValue> {
        let buttons = document.query_selector_all(".game-btn")?;
        for i in 0..buttons.length() {
            let Some(btn) = buttons.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let name = btn.get_attribute("data-game").unwrap_or_default();
            let arcade = Rc::clone(arcade);
            let launcher = launcher.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(kind) = GameKind::from_name(&name) else {
                    log::warn!("Unknown game: {:?}", name);
                    return;
                };
                if let Some(game) = launcher.build(kind) {
                    arcade.borrow_mut().load(game);
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(
        window: &web_sys::Window,
        arcade: &SharedArcade,
        launcher: &Launcher,
    ) -> Result<(), JsValue> {
        let arcade = Rc::clone(arcade);
        let launcher = launcher.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&launcher.canvas);
            arcade.borrow_mut().resize(launcher.viewport());
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_auto_pause(
        window: &web_sys::Window,
        document: &web_sys::Document,
        arcade: &SharedArcade,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let arcade = Rc::clone(arcade);
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    arcade.borrow_mut().pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let arcade = Rc::clone(arcade);
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                arcade.borrow_mut().pause();
                log::info!("Auto-paused (window blur)");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ledge_runner::consts::{MAX_SUBSTEPS, SIM_DT};
    use ledge_runner::platform::{FrameHandle, FrameLoop, FrameSource, InputState};
    use ledge_runner::renderer::CommandList;
    use ledge_runner::sim::{GameState, LevelLayout};
    use ledge_runner::{Platformer, Tuning, TuningError, Viewport};

    /// Thirty seconds of 60 Hz callbacks
    const FRAMES: u32 = 1800;

    /// Hands out handles; the runner below plays the browser's part
    #[derive(Default)]
    struct ScriptedFrames {
        next: i32,
    }

    impl FrameSource for ScriptedFrames {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            self.next += 1;
            Some(FrameHandle(self.next))
        }

        fn cancel_frame(&mut self, _handle: FrameHandle) {}
    }

    /// `ledge-runner [tuning.json] [level.json]`
    pub fn run(args: &[String]) -> Result<(), TuningError> {
        let tuning = match args.first() {
            Some(path) => Tuning::from_file(path)?,
            None => Tuning::default(),
        };
        let layout = match args.get(1) {
            Some(path) => LevelLayout::from_file(path)?,
            None => LevelLayout::classic(),
        };

        let viewport = Viewport::default();
        let input = Rc::new(RefCell::new(InputState::new()));
        let mut game = Platformer::new(
            GameState::new(tuning, layout, viewport),
            Rc::clone(&input),
            CommandList::new(viewport.width, viewport.height),
        );

        let mut source = ScriptedFrames::default();
        let mut frame_loop = FrameLoop::new(SIM_DT, MAX_SUBSTEPS);
        frame_loop.start(&mut source);

        let mut updates = 0u32;
        let mut dropped = 0u32;
        let mut time_ms = 0.0f64;
        for frame in 0..FRAMES {
            script(frame, &mut input.borrow_mut());
            // Alternate 16/17 ms callbacks, with one long stall mid-run
            time_ms += if frame == 900 { 500.0 } else { 16.0 + (frame % 2) as f64 };
            let stats = frame_loop.on_frame(time_ms, &mut game, &mut source);
            updates += stats.updates;
            dropped += stats.dropped_backlog as u32;
        }
        frame_loop.stop(&mut source);

        let state = game.state();
        log::info!(
            "Ran {} frames / {} updates ({} backlog drops): phase {:?}, score {}, lives {}, x {:.0}, draw calls {}",
            FRAMES,
            updates,
            dropped,
            state.phase,
            state.score,
            state.lives,
            state.player.body.pos.x,
            game.surface().commands.len()
        );
        Ok(())
    }

    /// Run right, hop every second
    fn script(frame: u32, input: &mut InputState) {
        if frame == 30 {
            input.key_down("ArrowRight", false);
        }
        match frame % 60 {
            0 => input.key_down("ArrowUp", false),
            12 => input.key_up("ArrowUp"),
            _ => {}
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ledge Runner (native) starting headless run...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match headless::run(&args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
