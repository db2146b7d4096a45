//! WebAssembly entry point and browser host.
//!
//! `create_circuit` mounts a `<canvas>` in a container, wires pointer, wheel
//! and resize listeners, and starts a `requestAnimationFrame` loop. The
//! returned [`CircuitHandle`] tears all of it down again on `destroy`.

use crate::circuit::Circuit;
use crate::config::CircuitOptions;
use circuitgrid_core::{GridError, PointerEvent};
use circuitgrid_render::{Canvas2d, Drawable, RgbaColor};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use peniko::Color;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlElement,
    ResizeObserver, WheelEvent,
};

/// `<canvas>` element as a drawing host.
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
}

impl WebCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Drawable for WebCanvas {
    type Context = WebContext;

    fn context_2d(&self) -> Option<WebContext> {
        let ctx = self.canvas.get_context("2d").ok().flatten()?;
        ctx.dyn_into::<CanvasRenderingContext2d>()
            .ok()
            .map(|ctx| WebContext { ctx })
    }

    fn logical_size(&self) -> Size {
        let rect = self.canvas.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }

    fn device_pixel_ratio(&self) -> f64 {
        web_sys::window().map_or(1.0, |window| window.device_pixel_ratio())
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn set_display_size(&mut self, size: Size) {
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", size.width)).ok();
        style.set_property("height", &format!("{}px", size.height)).ok();
    }
}

/// `CanvasRenderingContext2D` behind [`Canvas2d`].
pub struct WebContext {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d for WebContext {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_transform(&mut self, transform: Affine) {
        let [a, b, c, d, e, f] = transform.as_coeffs();
        self.ctx.set_transform(a, b, c, d, e, f).ok();
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.ctx.scale(sx, sy).ok();
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn set_fill_style(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&RgbaColor::from(color).to_css());
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.ctx.set_stroke_style_str(&RgbaColor::from(color).to_css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, point: Point) {
        self.ctx.move_to(point.x, point.y);
    }

    fn line_to(&mut self, point: Point) {
        self.ctx.line_to(point.x, point.y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}

fn to_js(err: GridError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

struct Session {
    circuit: RefCell<Circuit<WebCanvas>>,
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    frame_id: Cell<Option<i32>>,
    frame: RefCell<Option<Closure<dyn FnMut()>>>,
    listeners: RefCell<Vec<Listener>>,
    observer: RefCell<Option<(ResizeObserver, Closure<dyn FnMut(js_sys::Array)>)>>,
}

impl Session {
    fn listen(
        &self,
        target: EventTarget,
        kind: &'static str,
        passive: Option<bool>,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<(), JsValue> {
        match passive {
            Some(passive) => {
                let options = AddEventListenerOptions::new();
                options.set_passive(passive);
                target.add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    callback.as_ref().unchecked_ref(),
                    &options,
                )?;
            }
            None => target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?,
        }
        self.listeners.borrow_mut().push(Listener { target, kind, callback });
        Ok(())
    }

    /// Pointer position relative to the canvas' top-left corner.
    fn surface_position(&self, client_x: i32, client_y: i32) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(f64::from(client_x) - rect.left(), f64::from(client_y) - rect.top())
    }

    fn request_frame(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(frame) = self.frame.borrow().as_ref() {
            match window.request_animation_frame(frame.as_ref().unchecked_ref()) {
                Ok(id) => self.frame_id.set(Some(id)),
                Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
            }
        }
    }

    /// Re-fit the canvas to its container, then resize the backing store.
    fn resize(&self) {
        fill_container(&self.canvas);
        self.circuit.borrow_mut().resize();
    }

    fn destroy(&self) {
        let mut circuit = self.circuit.borrow_mut();
        if circuit.is_destroyed() {
            return;
        }
        circuit.destroy();

        if let (Some(window), Some(id)) = (web_sys::window(), self.frame_id.take()) {
            window.cancel_animation_frame(id).ok();
        }
        if let Some((observer, _)) = self.observer.borrow().as_ref() {
            observer.disconnect();
        }
        for listener in self.listeners.borrow().iter() {
            listener
                .target
                .remove_event_listener_with_callback(listener.kind, listener.callback.as_ref().unchecked_ref())
                .ok();
        }
        self.canvas.remove();
    }
}

// Listeners hold only weak references, so they must be detached before the closures go away.
impl Drop for Session {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Handle to a mounted grid, returned to JavaScript.
#[wasm_bindgen]
pub struct CircuitHandle {
    session: Rc<Session>,
}

#[wasm_bindgen]
impl CircuitHandle {
    #[wasm_bindgen(js_name = renderOnce)]
    pub fn render_once(&self) -> Result<(), JsValue> {
        self.session.circuit.borrow_mut().render_once().map_err(to_js)
    }

    pub fn resize(&self) {
        self.session.resize();
    }

    /// Stop the loop, detach listeners and remove the canvas. Idempotent.
    pub fn destroy(&self) {
        self.session.destroy();
    }

    #[wasm_bindgen(getter)]
    pub fn container(&self) -> HtmlElement {
        self.session.container.clone()
    }

    #[wasm_bindgen(getter, js_name = canvasElement)]
    pub fn canvas_element(&self) -> HtmlCanvasElement {
        self.session.canvas.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.session.circuit.borrow().viewport().zoom()
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&self, zoom: f64) {
        self.session.circuit.borrow_mut().viewport_mut().set_zoom(zoom);
    }

    #[wasm_bindgen(getter, js_name = offsetX)]
    pub fn offset_x(&self) -> f64 {
        self.session.circuit.borrow().viewport().offset().x
    }

    #[wasm_bindgen(getter, js_name = offsetY)]
    pub fn offset_y(&self) -> f64 {
        self.session.circuit.borrow().viewport().offset().y
    }

    #[wasm_bindgen(js_name = setOffset)]
    pub fn set_offset(&self, x: f64, y: f64) {
        self.session
            .circuit
            .borrow_mut()
            .viewport_mut()
            .set_offset(Vec2::new(x, y));
    }
}

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Mount a grid into the element matched by `selector`.
///
/// `options` is a JSON document; see [`CircuitOptions`].
#[wasm_bindgen(js_name = createCircuit)]
pub fn create_circuit(selector: &str, options: Option<String>) -> Result<CircuitHandle, JsValue> {
    let options = match options {
        Some(json) => CircuitOptions::from_json(&json).map_err(to_js)?,
        None => CircuitOptions::default(),
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("createCircuit: no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("createCircuit: no document"))?;
    let container = document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("createCircuit: container not found for selector: {}", selector)))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("createCircuit: selector did not resolve to an HTMLElement"))?;

    let canvas = document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
    fill_container(&canvas);
    canvas.style().set_property("display", "block")?;
    canvas.set_class_name(options.canvas.class_name.as_deref().unwrap_or(""));
    container.append_child(&canvas)?;

    let circuit = match Circuit::new(WebCanvas::new(canvas.clone()), &options) {
        Ok(circuit) => circuit,
        Err(err) => {
            canvas.remove();
            return Err(to_js(err));
        }
    };

    let session = Rc::new(Session {
        circuit: RefCell::new(circuit),
        canvas: canvas.clone(),
        container: container.clone(),
        frame_id: Cell::new(None),
        frame: RefCell::new(None),
        listeners: RefCell::new(Vec::new()),
        observer: RefCell::new(None),
    });

    wire_input(&session, &window)?;
    wire_resize(&session)?;
    start_loop(&session);

    log::info!("circuit mounted in {}", selector);
    Ok(CircuitHandle { session })
}

/// Let the canvas follow its container again so the next measurement sees the new layout.
fn fill_container(canvas: &HtmlCanvasElement) {
    let style = canvas.style();
    style.set_property("width", "100%").ok();
    style.set_property("height", "100%").ok();
}

fn wire_input(session: &Rc<Session>, window: &web_sys::Window) -> Result<(), JsValue> {
    let weak: Weak<Session> = Rc::downgrade(session);
    let on_wheel = Closure::wrap(Box::new(move |event: Event| {
        let Some(session) = weak.upgrade() else {
            return;
        };
        let Some(event) = event.dyn_ref::<WheelEvent>() else {
            return;
        };
        if !session.circuit.borrow().interaction_options().zoom {
            return;
        }
        event.prevent_default();
        let position = session.surface_position(event.client_x(), event.client_y());
        session.circuit.borrow_mut().handle_pointer(PointerEvent::Wheel {
            position,
            delta_y: event.delta_y(),
        });
    }) as Box<dyn FnMut(Event)>);
    session.listen(session.canvas.clone().into(), "wheel", Some(false), on_wheel)?;

    let weak = Rc::downgrade(session);
    let on_pointer_down = Closure::wrap(Box::new(move |event: Event| {
        let Some(session) = weak.upgrade() else {
            return;
        };
        let Some(event) = event.dyn_ref::<web_sys::PointerEvent>() else {
            return;
        };
        if !session.circuit.borrow().interaction_options().pan {
            return;
        }
        session.canvas.set_pointer_capture(event.pointer_id()).ok();
        let position = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        session.circuit.borrow_mut().handle_pointer(PointerEvent::Down { position });
    }) as Box<dyn FnMut(Event)>);
    session.listen(session.canvas.clone().into(), "pointerdown", None, on_pointer_down)?;

    let weak = Rc::downgrade(session);
    let on_pointer_move = Closure::wrap(Box::new(move |event: Event| {
        let Some(session) = weak.upgrade() else {
            return;
        };
        let Some(event) = event.dyn_ref::<web_sys::PointerEvent>() else {
            return;
        };
        let position = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        session.circuit.borrow_mut().handle_pointer(PointerEvent::Move { position });
    }) as Box<dyn FnMut(Event)>);
    session.listen(session.canvas.clone().into(), "pointermove", None, on_pointer_move)?;

    // Released anywhere on the page, not just over the canvas.
    let weak = Rc::downgrade(session);
    let on_pointer_up = Closure::wrap(Box::new(move |_event: Event| {
        if let Some(session) = weak.upgrade() {
            session.circuit.borrow_mut().handle_pointer(PointerEvent::Up);
        }
    }) as Box<dyn FnMut(Event)>);
    session.listen(window.clone().into(), "pointerup", None, on_pointer_up)?;

    Ok(())
}

fn wire_resize(session: &Rc<Session>) -> Result<(), JsValue> {
    let weak = Rc::downgrade(session);
    let on_resize = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
        if let Some(session) = weak.upgrade() {
            session.resize();
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
    observer.observe(&session.container);
    *session.observer.borrow_mut() = Some((observer, on_resize));
    Ok(())
}

fn start_loop(session: &Rc<Session>) {
    let weak = Rc::downgrade(session);
    let frame = Closure::wrap(Box::new(move || {
        let Some(session) = weak.upgrade() else {
            return;
        };
        if session.circuit.borrow().is_destroyed() {
            return;
        }
        if let Err(err) = session.circuit.borrow_mut().render_once() {
            log::error!("frame failed: {}", err);
        }
        session.request_frame();
    }) as Box<dyn FnMut()>);

    *session.frame.borrow_mut() = Some(frame);
    session.request_frame();
}
