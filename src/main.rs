//! Shadow Cone entry point
//!
//! Web: interactive canvas driven by mouse events.
//! Native: headless replay of a scripted drag session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use shadow_cone::consts::*;
    use shadow_cone::renderer::GpuCanvas;
    use shadow_cone::sim::{InputEvent, LoopControl, PointerButton};
    use shadow_cone::{App, Settings};

    /// App plus the events queued since the last animation frame
    struct Runner {
        app: App<GpuCanvas>,
        pending: VecDeque<InputEvent>,
        running: bool,
    }

    impl Runner {
        fn push(&mut self, event: InputEvent) {
            self.pending.push_back(event);
        }

        /// Drain the queue and draw one frame
        fn tick(&mut self) {
            let events: Vec<InputEvent> = self.pending.drain(..).collect();
            match self.app.frame(events) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Quit) => self.running = false,
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.app.canvas.size;
                    self.app.canvas.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                    self.running = false;
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    fn mouse_position(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("{} starting...", WINDOW_TITLE);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        document.set_title(WINDOW_TITLE);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(WINDOW_WIDTH);
        canvas.set_height(WINDOW_HEIGHT);

        let settings = Settings::load();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let gpu = GpuCanvas::new(surface, &adapter, WINDOW_WIDTH, WINDOW_HEIGHT)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let app = App::new(settings, gpu).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let runner = Rc::new(RefCell::new(Runner {
            app,
            pending: VecDeque::new(),
            running: true,
        }));

        setup_input_handlers(&canvas, runner.clone())?;
        request_animation_frame(runner);

        log::info!("{} running!", WINDOW_TITLE);
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        runner: Rc<RefCell<Runner>>,
    ) -> Result<(), JsValue> {
        // Mouse down
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                runner.borrow_mut().push(InputEvent::PointerDown {
                    button: PointerButton::from_dom_index(event.button()),
                    position: mouse_position(&event),
                });
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse up - listen on the window so releases outside the canvas still end drags
        {
            let runner = runner.clone();
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                runner.borrow_mut().push(InputEvent::PointerUp {
                    button: PointerButton::from_dom_index(event.button()),
                });
            });
            window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                runner.borrow_mut().push(InputEvent::PointerMove {
                    position: mouse_position(&event),
                });
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Page teardown
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                runner.borrow_mut().push(InputEvent::Quit);
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(runner: Rc<RefCell<Runner>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(runner);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(runner: Rc<RefCell<Runner>>) {
        let running = {
            let mut r = runner.borrow_mut();
            r.tick();
            r.running
        };

        if running {
            request_animation_frame(runner);
        } else {
            log::info!("{} stopped", WINDOW_TITLE);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    web::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = headless::run(std::env::args().nth(1)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use shadow_cone::consts::*;
    use shadow_cone::renderer::RecordingCanvas;
    use shadow_cone::sim::{InputEvent, LoopControl, PointerButton};
    use shadow_cone::{App, Settings, SettingsError};

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            position: Vec2::new(x, y),
        }
    }

    fn release() -> InputEvent {
        InputEvent::PointerUp {
            button: PointerButton::Primary,
        }
    }

    fn move_to(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove {
            position: Vec2::new(x, y),
        }
    }

    /// Frames of a scripted session: drag the light into the occluder, then
    /// swing the occluder around the light, then quit
    fn script(settings: &Settings) -> Vec<Vec<InputEvent>> {
        let light = settings.light_center;
        let occluder = settings.occluder_center;

        let mut frames = vec![vec![press(light.x, light.y)]];
        for step in 1..=10 {
            let p = light.lerp(occluder, step as f32 / 10.0);
            frames.push(vec![move_to(p.x, p.y)]);
        }
        frames.push(vec![release()]);

        frames.push(vec![press(occluder.x, occluder.y)]);
        for step in 0..12 {
            let angle = step as f32 * std::f32::consts::TAU / 12.0;
            let p = Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32) / 2.0
                + Vec2::from_angle(angle) * 150.0;
            frames.push(vec![move_to(p.x, p.y)]);
        }
        frames.push(vec![release(), InputEvent::Quit]);
        frames
    }

    pub fn run(settings_path: Option<String>) -> Result<(), SettingsError> {
        let settings = match settings_path {
            Some(path) => Settings::load_from_path(path)?,
            None => Settings::default(),
        };

        log::info!("{} (native, headless) starting...", WINDOW_TITLE);
        log::info!("Native mode replays a scripted session - build for wasm32 to interact");

        let script = script(&settings);
        let mut app = App::new(settings, RecordingCanvas::new(WINDOW_WIDTH, WINDOW_HEIGHT))?;

        for events in script {
            let control = match app.frame(events) {
                Ok(control) => control,
                Err(never) => match never {},
            };

            if let Some(frame) = app.last_frame() {
                log::info!(
                    "frame {:>2}: light ({:6.1}, {:6.1}) occluder ({:6.1}, {:6.1}) drag {:?}, {} of {} rays clipped",
                    app.frame_count(),
                    app.state.light.center.x,
                    app.state.light.center.y,
                    app.state.occluder.center.x,
                    app.state.occluder.center.y,
                    app.state.drag,
                    frame.clipped_count(),
                    frame.segments.len(),
                );
            }

            if control == LoopControl::Quit {
                break;
            }
        }

        log::info!("Rendered {} frames", app.canvas.frames_presented());
        Ok(())
    }
}
