mod dom_helpers;
pub mod color;
pub mod logger;
pub mod particle;
pub mod pointer;
pub mod renderer;
pub mod shapes;
pub mod simulation;
pub mod snowman;
mod utils;

extern crate nalgebra_glm as glm;

use renderer::{CanvasRenderer, DrawSurface};
use simulation::Simulation;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Event, EventTarget, HtmlCanvasElement, MouseEvent};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    logger::init(log::LevelFilter::Info);
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }

    // Console timings only while debug logging is on; a running loop would
    // otherwise flood the console every frame
    pub fn when_debugging(name: &'a str) -> Option<Timer<'a>> {
        if log::log_enabled!(log::Level::Debug) {
            Some(Timer::new(name))
        } else {
            None
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// One snowman bound to one canvas. JS can drive it frame by frame, or hand the
// canvas to `start` and let it run itself.
#[wasm_bindgen]
pub struct SnowmanCanvas {
    simulation: Simulation,
    renderer: CanvasRenderer,
}

#[wasm_bindgen]
impl SnowmanCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Result<SnowmanCanvas, JsValue> {
        let renderer = CanvasRenderer::new(canvas)?;
        let simulation = Simulation::snowman();
        Ok(SnowmanCanvas {
            simulation,
            renderer,
        })
    }

    pub fn update(&mut self) {
        let _timer = Timer::when_debugging("SnowmanCanvas::update()");
        self.simulation.step();
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        let _timer = Timer::when_debugging("SnowmanCanvas::render()");
        renderer::render_frame(&mut self.simulation, &mut self.renderer).map(|_| ())
    }

    pub fn frame(&mut self) -> Result<(), JsValue> {
        self.update();
        self.render()
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> usize {
        let width = self.renderer.width() as f64;
        let height = self.renderer.height() as f64;
        self.simulation.pointer_moved(x, y, width, height)
    }

    pub fn pointer_leave(&mut self) {
        self.simulation.pointer_left();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    pub fn particle_count(&self) -> usize {
        self.simulation.len()
    }

    pub fn rotation(&self) -> f64 {
        self.simulation.rotation()
    }
}

type Listener = (EventTarget, &'static str, Closure<dyn FnMut(Event)>);

// Handle for a running animation started by `start`. Dropping it from JS
// without calling `stop` leaves the loop running.
#[wasm_bindgen]
pub struct FrameLoop {
    app: Rc<RefCell<SnowmanCanvas>>,
    running: Rc<Cell<bool>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl FrameLoop {
    pub fn stop(&mut self) -> Result<(), JsValue> {
        self.running.set(false);
        let result = dom_helpers::try_each(self.listeners.drain(..), |(target, event, callback)| {
            let result = dom_helpers::unlisten(&target, event, &callback);
            if result.is_err() {
                // JS still holds it, so it has to outlive this handle
                callback.forget();
            }
            result
        });
        log::info!("animation stopped");
        result
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn particle_count(&self) -> usize {
        self.app.borrow().particle_count()
    }
}

// Sizes the canvas to the window, builds the snowman, wires pointer and resize
// events and starts a self-requesting animation frame loop
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<FrameLoop, JsValue> {
    initialize();

    let window = dom_helpers::window()?;
    let canvas = dom_helpers::canvas_by_id(&window, canvas_id)?;
    let (width, height) = dom_helpers::viewport_size(&window)?;
    let mut app = SnowmanCanvas::new(canvas.clone())?;
    app.resize(width, height);
    let app = Rc::new(RefCell::new(app));
    let running = Rc::new(Cell::new(true));

    let mut listeners: Vec<Listener> = Vec::new();
    {
        let app = app.clone();
        let on_move = Closure::wrap(Box::new(move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                app.borrow_mut()
                    .pointer_move(mouse.offset_x() as f64, mouse.offset_y() as f64);
            }
        }) as Box<dyn FnMut(Event)>);
        dom_helpers::listen(canvas.as_ref(), "mousemove", &on_move)?;
        listeners.push((canvas.clone().into(), "mousemove", on_move));
    }
    {
        let app = app.clone();
        let on_leave = Closure::wrap(Box::new(move |_event: Event| {
            app.borrow_mut().pointer_leave();
        }) as Box<dyn FnMut(Event)>);
        dom_helpers::listen(canvas.as_ref(), "mouseleave", &on_leave)?;
        listeners.push((canvas.clone().into(), "mouseleave", on_leave));
    }
    {
        let app = app.clone();
        let resize_window = window.clone();
        let on_resize = Closure::wrap(Box::new(move |_event: Event| {
            match dom_helpers::viewport_size(&resize_window) {
                Ok((width, height)) => app.borrow_mut().resize(width, height),
                Err(err) => log::warn!("could not read viewport size: {:?}", err),
            }
        }) as Box<dyn FnMut(Event)>);
        dom_helpers::listen(window.as_ref(), "resize", &on_resize)?;
        listeners.push((window.clone().into(), "resize", on_resize));
    }

    // The frame callback keeps a handle to itself so it can request the next
    // frame, and drops itself once the loop is stopped
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    {
        let next = frame.clone();
        let app = app.clone();
        let running = running.clone();
        let frame_window = window.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !running.get() {
                let _ = next.borrow_mut().take();
                return;
            }
            if let Err(err) = app.borrow_mut().frame() {
                log::error!("frame failed: {:?}", err);
            }
            if let Some(callback) = next.borrow().as_ref() {
                if let Err(err) = dom_helpers::request_animation_frame(&frame_window, callback) {
                    log::error!("could not request the next frame: {:?}", err);
                }
            }
        }) as Box<dyn FnMut()>));
    }
    if let Some(callback) = frame.borrow().as_ref() {
        dom_helpers::request_animation_frame(&window, callback)?;
    }

    log::info!(
        "animating {} particles on a {}x{} canvas",
        app.borrow().particle_count(),
        width,
        height
    );
    Ok(FrameLoop {
        app,
        running,
        listeners,
    })
}
