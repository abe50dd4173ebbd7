// Helper functions for the browser side: finding the canvas, sizing it to the
// viewport, requesting frames and (un)registering event listeners

use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{EventTarget, HtmlCanvasElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

pub fn canvas_by_id(window: &Window, id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from(format!("no element with id `{}`", id)))?;
    element
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from(format!("element `{}` is not a canvas", id)))
}

pub fn viewport_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerWidth is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

pub fn request_animation_frame(window: &Window, callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window.request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
}

pub fn listen<T: WasmClosure + ?Sized>(
    target: &EventTarget,
    event: &str,
    callback: &Closure<T>,
) -> Result<(), JsValue> {
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref::<js_sys::Function>())
}

pub fn unlisten<T: WasmClosure + ?Sized>(
    target: &EventTarget,
    event: &str,
    callback: &Closure<T>,
) -> Result<(), JsValue> {
    target.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref::<js_sys::Function>())
}

// Runs `f` over every item even after a failure; hands back the first error
pub fn try_each<T, E>(
    items: impl IntoIterator<Item = T>,
    mut f: impl FnMut(T) -> Result<(), E>,
) -> Result<(), E> {
    let mut first_err = None;
    for item in items {
        if let Err(err) = f(item) {
            first_err.get_or_insert(err);
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
