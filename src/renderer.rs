// Renderer side of a frame: the drawing surface contract, the painter's
// algorithm pass over the simulation, and a 2d canvas implementation.

use crate::color::Color;
use crate::simulation::Simulation;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

// Anything that can show filled circles. The core never reads pixels back.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<(), JsValue>;
}

// Clears, sorts back to front, then draws every visible particle.
// Returns how many circles were drawn.
pub fn render_frame<S: DrawSurface + ?Sized>(
    simulation: &mut Simulation,
    surface: &mut S,
) -> Result<usize, JsValue> {
    surface.clear();
    simulation.sort_by_depth();

    let width = surface.width() as f64;
    let height = surface.height() as f64;
    let mut drawn = 0;
    for particle in simulation.particles() {
        if !particle.is_visible() {
            continue;
        }
        let proj = particle.project(Simulation::SCALE, width, height);
        surface.fill_circle(proj.x, proj.y, proj.radius, particle.color)?;
        drawn += 1;
    }
    Ok(drawn)
}

pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
    fill_style: Option<Color>,
}

impl CanvasRenderer {
    // Grabs the 2d context from the canvas
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(CanvasRenderer {
            canvas,
            context,
            fill_style: None,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        // Resizing resets the context state, fill style included
        self.fill_style = None;
    }
}

impl DrawSurface for CanvasRenderer {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self) {
        self.context
            .clear_rect(0.0, 0.0, self.width() as f64, self.height() as f64);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<(), JsValue> {
        // Particles come in long runs of one colour, only switch when it changes
        if self.fill_style != Some(color) {
            self.context.set_fill_style(&JsValue::from_str(&color.to_css()));
            self.fill_style = Some(color);
        }
        self.context.begin_path();
        self.context.arc(x, y, radius, 0.0, TAU)?;
        self.context.fill();
        Ok(())
    }
}
