//! Cat Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use cat_run::consts::*;
    use cat_run::platform::{FrameHandle, FrameHost, map_key, map_mouse_button};
    use cat_run::sim::ParticleKind;
    use cat_run::{FrameView, InputEvent, Session, SessionPhase, Tuning};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// `requestAnimationFrame` behind the `FrameHost` seam
    struct WebHost {
        window: web_sys::Window,
        callback: FrameCallback,
    }

    impl FrameHost for WebHost {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            let callback = self.callback.borrow();
            let Some(closure) = callback.as_ref() else {
                log::error!("Frame requested before the callback was installed");
                return None;
            };
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
            let _ = self.window.cancel_animation_frame(handle.0);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<WebHost>,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        fn handle(&mut self, event: InputEvent) {
            if self.session.handle_input(event) {
                self.render();
            }
        }

        fn render(&self) {
            if let Err(e) = draw(&self.ctx, &self.session.view()) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    fn draw(ctx: &CanvasRenderingContext2d, view: &FrameView<'_>) -> Result<(), JsValue> {
        let w = PLAYFIELD_WIDTH as f64;
        let h = PLAYFIELD_HEIGHT as f64;
        let ground = GROUND_Y as f64;

        ctx.clear_rect(0.0, 0.0, w, h);

        // Sky and ground
        ctx.set_fill_style_str("#fef7e0");
        ctx.fill_rect(0.0, 0.0, w, ground);
        ctx.set_fill_style_str("#f3e5f5");
        ctx.fill_rect(0.0, ground, w, h - ground);
        ctx.set_stroke_style_str("#e1bee7");
        ctx.set_line_width(2.0);
        let period = GROUND_PATTERN_PERIOD as f64;
        let mut x = -(view.ground_scroll as f64);
        while x < w {
            ctx.begin_path();
            ctx.move_to(x, ground);
            ctx.line_to(x + period / 2.0, ground + 5.0);
            ctx.line_to(x + period, ground);
            ctx.stroke();
            x += period;
        }

        ctx.set_fill_style_str("#f8bbd9");
        for cloud in view.clouds {
            let (cx, cy, s) = (
                cloud.pos.x as f64,
                cloud.pos.y as f64,
                cloud.size as f64,
            );
            ctx.begin_path();
            ctx.arc(cx, cy, s * 0.5, 0.0, std::f64::consts::TAU)?;
            ctx.arc(cx + s * 0.4, cy + s * 0.1, s * 0.4, 0.0, std::f64::consts::TAU)?;
            ctx.arc(cx - s * 0.3, cy + s * 0.1, s * 0.4, 0.0, std::f64::consts::TAU)?;
            ctx.fill();
        }

        ctx.set_fill_style_str("#8d6e63");
        for obstacle in view.obstacles {
            let b = obstacle.bounds();
            ctx.fill_rect(b.x as f64, b.y as f64, b.w as f64, b.h as f64);
        }

        let p = view.player.bounds();
        ctx.set_fill_style_str("#ff9800");
        ctx.fill_rect(p.x as f64, p.y as f64, p.w as f64, p.h as f64);

        for particle in view.particles {
            ctx.set_global_alpha(particle.alpha() as f64);
            ctx.set_fill_style_str(match particle.kind {
                ParticleKind::Dust => "#ffb6c1",
                ParticleKind::Spark => "#ff5722",
            });
            ctx.begin_path();
            ctx.arc(
                particle.pos.x as f64,
                particle.pos.y as f64,
                3.0,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);

        ctx.set_fill_style_str("#6a1b9a");
        ctx.set_font("16px monospace");
        ctx.set_text_align("right");
        ctx.fill_text(&format!("Score: {:05}", view.score), w - 20.0, 30.0)?;

        let banner = match view.phase {
            SessionPhase::Idle => Some(("Cat Run", "Press SPACE or CLICK to start")),
            SessionPhase::Paused => Some(("Paused", "Press ESC to resume")),
            SessionPhase::GameOver => Some(("Game Over", "Press SPACE or CLICK to restart")),
            SessionPhase::Running => None,
        };
        if let Some((title, hint)) = banner {
            ctx.set_text_align("center");
            ctx.set_font("bold 28px sans-serif");
            ctx.fill_text(title, w / 2.0, h / 2.0 - 20.0)?;
            ctx.set_font("16px sans-serif");
            ctx.fill_text(hint, w / 2.0, h / 2.0 + 10.0)?;
        }
        Ok(())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        log::info!("Cat Run starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
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
            log::error!("Canvas element #canvas not found");
            return;
        };
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::error!("Context is not a CanvasRenderingContext2d");
                    return;
                }
            },
            _ => {
                log::error!("Canvas 2D context unavailable");
                return;
            }
        };
        canvas.set_width(PLAYFIELD_WIDTH as u32);
        canvas.set_height(PLAYFIELD_HEIGHT as u32);

        let seed = js_sys::Date::now() as u64;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let host = WebHost {
            window: window.clone(),
            callback: callback.clone(),
        };
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(host, Tuning::load(), seed),
            ctx,
        }));
        log::info!("Game initialized with seed: {}", seed);

        // Frame loop
        {
            let game = game.clone();
            *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
                let mut g = game.borrow_mut();
                g.session.on_frame(timestamp);
                g.render();
            }));
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(control) = map_key(&event.code()) else {
                    return;
                };
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(input) = control.to_event(g.session.phase()) {
                    g.handle(input);
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(control) = map_mouse_button(event.button()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                if let Some(input) = control.to_event(g.session.phase()) {
                    g.handle(input);
                }
            });
            let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        setup_auto_pause(game.clone());

        // Teardown
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.shutdown();
                log::info!("Session shut down");
            });
            let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        game.borrow().render();
        log::info!("Cat Run ready!");
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.session.phase() == SessionPhase::Running {
                        g.handle(InputEvent::TogglePause);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.session.phase() == SessionPhase::Running {
                    g.handle(InputEvent::TogglePause);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
    log::info!("Cat Run (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(20_240_601);
    let score = run_headless(seed);
    println!("Autopilot finished with score {score} (seed {seed})");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one session with a simple autopilot at 60 Hz; returns the final score
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64) -> u32 {
    use cat_run::platform::RecordingHost;
    use cat_run::{InputEvent, Session, SessionPhase, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;
    // Jump when the next obstacle is this many seconds away
    const LEAD_TIME: f32 = 0.3;

    let mut session = Session::new(RecordingHost::new(), Tuning::load(), seed);
    session.handle_input(InputEvent::StartOrRestart);

    let mut now = 0.0;
    let mut frames = 0;
    while session.host_mut().take_pending().is_some() && frames < MAX_FRAMES {
        let view = session.view();
        let hitbox_right = view.player.x + view.player.width - session.tuning().hitbox_inset;
        let threat = view
            .obstacles
            .iter()
            .map(|o| (o.x - hitbox_right) / view.scroll_speed)
            .find(|&eta| eta >= 0.0);
        if threat.is_some_and(|eta| eta < LEAD_TIME) {
            session.handle_input(InputEvent::Jump);
        }

        session.on_frame(now);
        now += FRAME_MS;
        frames += 1;
    }

    if session.phase() == SessionPhase::Running {
        log::info!("Demo time limit reached");
        session.shutdown();
    }
    session.state().score
}
