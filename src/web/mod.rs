// web/ - Browser binding
//
// Wires a NodeField to a full-viewport canvas:
//   - requestAnimationFrame loop that ticks the field into the 2D context
//   - resize listener that resizes the canvas and rebuilds the field
//   - mousemove / touchmove listeners that overwrite the pointer
//
// Everything runs on the page's one thread. The pointer is a plain Cell
// shared by the input closures and the frame closure.

mod canvas;

pub use canvas::CanvasSurface;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use crate::sim::{NodeField, Pointer};

struct Scene {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    field: NodeField,
}

type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running animation. Dropping it unhooks listeners and stops the loop.
pub struct Mounted {
    window: Window,
    scene: Rc<RefCell<Scene>>,
    pointer: Rc<Cell<Pointer>>,

    tick: FrameLoop,
    frame_id: Rc<Cell<Option<i32>>>,

    on_resize: Closure<dyn FnMut()>,
    on_mouse: Closure<dyn FnMut(MouseEvent)>,
    on_touch: Closure<dyn FnMut(TouchEvent)>,
}

fn js_err(msg: &str) -> JsValue {
    JsValue::from_str(msg)
}

fn viewport(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn seed() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}

/// Pin the canvas over the page and let input fall through to the content
fn overlay(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let style = canvas.style();
    style.set_property("position", "fixed")?;
    style.set_property("inset", "0")?;
    style.set_property("pointer-events", "none")?;
    style.set_property("z-index", "0")?;
    Ok(())
}

fn schedule(window: &Window, tick: &FrameLoop) -> Result<i32, JsValue> {
    let tick = tick.borrow();
    let cb = tick.as_ref().ok_or_else(|| js_err("frame loop already torn down"))?;
    window.request_animation_frame(cb.as_ref().unchecked_ref())
}

/// Counters shared between a mount handle and its closures
#[derive(Clone, Default)]
pub struct Stats {
    /// Frames drawn
    pub frames: Rc<Cell<u32>>,
    /// Resize / mouse / touch events handled
    pub inputs: Rc<Cell<u32>>,
}

fn bump(c: &Cell<u32>) {
    c.set(c.get().wrapping_add(1));
}

pub fn mount(canvas: HtmlCanvasElement, stats: Stats) -> Result<Mounted, JsValue> {
    let window = web_sys::window().ok_or_else(|| js_err("missing window"))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| js_err("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    overlay(&canvas)?;

    let (w, h) = viewport(&window);
    canvas.set_width(w);
    canvas.set_height(h);
    let field = NodeField::new(w, h, seed());
    log::info!("node field mounted: {}x{}, {} nodes", w, h, field.len());

    let scene = Rc::new(RefCell::new(Scene {
        canvas,
        surface: CanvasSurface::new(ctx),
        field,
    }));
    let pointer = Rc::new(Cell::new(Pointer::default()));

    let on_resize = {
        let scene = scene.clone();
        let window = window.clone();
        let inputs = stats.inputs.clone();
        Closure::<dyn FnMut()>::new(move || {
            bump(&inputs);
            let (w, h) = viewport(&window);
            let mut s = scene.borrow_mut();
            s.canvas.set_width(w);
            s.canvas.set_height(h);
            s.field.resize(w, h);
            log::debug!("resized to {}x{}, {} nodes", w, h, s.field.len());
        })
    };

    let on_mouse = {
        let pointer = pointer.clone();
        let inputs = stats.inputs.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
            bump(&inputs);
            pointer.set(Pointer::new(e.client_x() as f32, e.client_y() as f32));
        })
    };

    let on_touch = {
        let pointer = pointer.clone();
        let inputs = stats.inputs.clone();
        Closure::<dyn FnMut(TouchEvent)>::new(move |e: TouchEvent| {
            bump(&inputs);
            if let Some(t) = e.touches().get(0) {
                pointer.set(Pointer::new(t.client_x() as f32, t.client_y() as f32));
            }
        })
    };

    // The closure reschedules itself through `next`; teardown takes it out
    // of the cell, which breaks the cycle.
    let tick: FrameLoop = Rc::new(RefCell::new(None));
    let frame_id = Rc::new(Cell::new(None));
    {
        let next = tick.clone();
        let scene = scene.clone();
        let window = window.clone();
        let frame_id = frame_id.clone();
        let pointer = pointer.clone();
        let frames = stats.frames;
        *tick.borrow_mut() = Some(Closure::new(move || {
            {
                let mut s = scene.borrow_mut();
                let Scene { surface, field, .. } = &mut *s;
                field.set_pointer(pointer.get());
                field.tick(surface);
            }
            bump(&frames);
            match schedule(&window, &next) {
                Ok(id) => frame_id.set(Some(id)),
                Err(e) => {
                    log::debug!("frame loop stopped: {:?}", e);
                    frame_id.set(None);
                }
            }
        }));
    }

    // From here on a failed step drops `mounted`, and Drop unhooks
    // whatever was already registered.
    let mounted = Mounted {
        window,
        scene,
        pointer,
        tick,
        frame_id,
        on_resize,
        on_mouse,
        on_touch,
    };

    let w = &mounted.window;
    w.add_event_listener_with_callback("resize", mounted.on_resize.as_ref().unchecked_ref())?;
    w.add_event_listener_with_callback("mousemove", mounted.on_mouse.as_ref().unchecked_ref())?;
    w.add_event_listener_with_callback("touchmove", mounted.on_touch.as_ref().unchecked_ref())?;

    let id = schedule(w, &mounted.tick)?;
    mounted.frame_id.set(Some(id));

    Ok(mounted)
}

impl Mounted {
    pub fn particle_count(&self) -> usize {
        self.scene.borrow().field.len()
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer.get()
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        let w = &self.window;
        let _ = w.remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        let _ = w.remove_event_listener_with_callback("mousemove", self.on_mouse.as_ref().unchecked_ref());
        let _ = w.remove_event_listener_with_callback("touchmove", self.on_touch.as_ref().unchecked_ref());

        if let Some(id) = self.frame_id.take() {
            let _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
        log::debug!("node field unmounted");
    }
}
