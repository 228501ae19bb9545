// ============================================================================
// NODE FIELD - Drifting, linked, pointer-shy nodes for a page background
// ============================================================================
//
// The simulation and painter are plain Rust and build anywhere. The browser
// binding (web/) and the exported mount handle only exist on wasm32.

pub mod config;
pub mod render;
pub mod sim;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::{Regime, node_count};
pub use render::{Painter, Rgba, Surface, link_alpha};
pub use sim::{NodeField, Nodes, Pointer};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, prelude::*};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Handle for one animated canvas. `unmount` (or dropping it on the JS side
/// via `free`) stops the loop and removes every listener.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct NodeAnimation {
    mounted: Option<web::Mounted>,
    stats: web::Stats,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl NodeAnimation {
    /// Start animating `canvas`. If no 2D context can be had this quietly
    /// returns a handle that does nothing.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: web_sys::HtmlCanvasElement) -> NodeAnimation {
        let stats = web::Stats::default();
        let mounted = match web::mount(canvas, stats.clone()) {
            Ok(m) => Some(m),
            Err(e) => {
                log::debug!("node field not mounted: {:?}", e);
                None
            }
        };
        Self { mounted, stats }
    }

    #[wasm_bindgen(js_name = mountById)]
    pub fn mount_by_id(id: &str) -> NodeAnimation {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok());

        match canvas {
            Some(c) => Self::new(c),
            None => {
                log::debug!("no canvas #{}", id);
                Self { mounted: None, stats: web::Stats::default() }
            }
        }
    }

    pub fn unmount(&mut self) {
        self.mounted.take();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.mounted.is_some()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.mounted.as_ref().map_or(0, |m| m.particle_count())
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u32 {
        self.stats.frames.get()
    }

    /// Resize, mouse and touch events handled so far
    pub fn inputs(&self) -> u32 {
        self.stats.inputs.get()
    }

    /// Last pointer position seen, origin until the first move
    #[wasm_bindgen(js_name = pointerX)]
    pub fn pointer_x(&self) -> f32 {
        self.mounted.as_ref().map_or(0.0, |m| m.pointer().x)
    }

    #[wasm_bindgen(js_name = pointerY)]
    pub fn pointer_y(&self) -> f32 {
        self.mounted.as_ref().map_or(0.0, |m| m.pointer().y)
    }
}
