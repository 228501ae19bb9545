// Browser tests: mount, overlay styling, input listeners, teardown.
//
// Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use node_field::{NodeAnimation, node_count};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, MouseEventInit, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().unwrap()
}

fn fire(kind: &str) {
    window().dispatch_event(&Event::new(kind).unwrap()).unwrap();
}

fn canvas() -> HtmlCanvasElement {
    let doc = web_sys::window().unwrap().document().unwrap();
    let el = doc.create_element("canvas").unwrap();
    doc.body().unwrap().append_child(&el).unwrap();
    el.dyn_into().unwrap()
}

fn viewport() -> (u32, u32) {
    let w = web_sys::window().unwrap();
    (
        w.inner_width().unwrap().as_f64().unwrap() as u32,
        w.inner_height().unwrap().as_f64().unwrap() as u32,
    )
}

async fn sleep(ms: i32) {
    let p = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(p).await.unwrap();
}

#[wasm_bindgen_test]
fn mount_sizes_canvas_to_viewport() {
    let c = canvas();
    let mut anim = NodeAnimation::new(c.clone());
    let (w, h) = viewport();

    assert!(anim.is_running());
    assert_eq!((c.width(), c.height()), (w, h));
    assert_eq!(anim.particle_count(), node_count(w, h));
    anim.unmount();
}

#[wasm_bindgen_test]
fn canvas_is_a_passive_overlay() {
    let c = canvas();
    let mut anim = NodeAnimation::new(c.clone());
    let style = c.style();
    assert_eq!(style.get_property_value("position").unwrap(), "fixed");
    assert_eq!(style.get_property_value("pointer-events").unwrap(), "none");
    anim.unmount();
}

#[wasm_bindgen_test]
fn missing_canvas_is_inert() {
    let anim = NodeAnimation::mount_by_id("no-such-canvas");
    assert!(!anim.is_running());
    assert_eq!(anim.particle_count(), 0);
    assert_eq!(anim.frames(), 0);
}

#[wasm_bindgen_test]
async fn unmount_stops_drawing() {
    let mut anim = NodeAnimation::new(canvas());
    sleep(250).await;
    assert!(anim.frames() > 0, "loop never ran");

    anim.unmount();
    assert!(!anim.is_running());
    let frozen = anim.frames();
    sleep(250).await;
    assert_eq!(anim.frames(), frozen);
}

#[wasm_bindgen_test]
fn resize_event_resizes_canvas_and_field() {
    let c = canvas();
    let mut anim = NodeAnimation::new(c.clone());
    let (w, h) = viewport();

    c.set_width(1);
    c.set_height(1);
    let before = anim.inputs();
    fire("resize");

    assert_eq!(anim.inputs(), before + 1);
    assert_eq!((c.width(), c.height()), (w, h));
    assert_eq!(anim.particle_count(), node_count(w, h));
    anim.unmount();
}

#[wasm_bindgen_test]
fn mousemove_overwrites_pointer() {
    let mut anim = NodeAnimation::new(canvas());
    assert_eq!((anim.pointer_x(), anim.pointer_y()), (0.0, 0.0));

    for (x, y) in [(120, 80), (300, 45)] {
        let init = MouseEventInit::new();
        init.set_client_x(x);
        init.set_client_y(y);
        let ev = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
        window().dispatch_event(&ev).unwrap();
    }

    // Last writer wins
    assert_eq!((anim.pointer_x(), anim.pointer_y()), (300.0, 45.0));
    assert_eq!(anim.inputs(), 2);
    anim.unmount();
}

#[wasm_bindgen_test]
fn unmount_removes_listeners() {
    // A listener left behind would call a dropped closure, which throws and
    // surfaces as a window error event.
    let errors = Rc::new(Cell::new(0u32));
    let on_error = {
        let errors = errors.clone();
        Closure::<dyn FnMut()>::new(move || errors.set(errors.get() + 1))
    };
    window()
        .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
        .unwrap();

    let mut anim = NodeAnimation::new(canvas());
    fire("resize");
    assert_eq!(anim.inputs(), 1);

    anim.unmount();
    for kind in ["resize", "mousemove", "touchmove"] {
        fire(kind);
    }

    assert_eq!(anim.inputs(), 1);
    assert_eq!(errors.get(), 0);
    window()
        .remove_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
        .unwrap();
}
