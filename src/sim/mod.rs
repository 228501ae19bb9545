// sim/ - Node field simulation
//
// Owns the node set and steps it once per display frame. Drawing is
// interleaved with the update: node i is moved, linked to every node
// after it, then drawn, before node i + 1 is touched.

mod nodes;
mod pointer;

pub use nodes::Nodes;
pub use pointer::Pointer;

use crate::config::Regime;
use crate::render::{Painter, Surface};

pub struct NodeField {
    // Viewport
    w: u32,
    h: u32,
    regime: Regime,

    nodes: Nodes,
    pointer: Pointer,

    // RNG state
    rng: u32,
}

impl NodeField {
    pub fn new(w: u32, h: u32, seed: u32) -> Self {
        let mut field = Self {
            w,
            h,
            regime: Regime::for_width(w),
            nodes: Nodes::new(),
            pointer: Pointer::default(),
            // xorshift sticks at zero
            rng: if seed == 0 { 0xDEADBEEF } else { seed },
        };
        field.respawn();
        field
    }

    /// New viewport: pick the regime again and rebuild every node
    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        self.regime = Regime::for_width(w);
        self.respawn();
    }

    fn respawn(&mut self) {
        let count = self.regime.node_count(self.w, self.h);
        self.nodes.respawn(count, self.w as f32, self.h as f32, &self.regime, &mut self.rng);
    }

    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }

    /// One frame: clear, then move / link / draw each node in order
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let (w, h) = (self.w as f32, self.h as f32);
        let max = self.regime.max_distance;
        let n = &mut self.nodes;

        surface.clear(w, h);

        for i in 0..n.len() {
            n.advance(i, w, h, self.pointer, &self.regime);

            for j in (i + 1)..n.len() {
                let d = n.distance(i, j);
                if d < max {
                    Painter::link(surface, (n.x[i], n.y[i]), (n.x[j], n.y[j]), d, max);
                }
            }

            Painter::node(surface, n.x[i], n.y[i], n.r[i]);
        }
    }

    // Random number generator (xorshift32)
    #[inline(always)]
    pub fn rand(rng: &mut u32) -> f32 {
        *rng ^= *rng << 13;
        *rng ^= *rng >> 17;
        *rng ^= *rng << 5;
        (*rng >> 8) as f32 * (1.0 / 16777216.0)
    }

    pub fn nodes(&self) -> &Nodes { &self.nodes }
    pub fn pointer(&self) -> Pointer { self.pointer }
    pub fn regime(&self) -> &Regime { &self.regime }
    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
    pub fn width(&self) -> u32 { self.w }
    pub fn height(&self) -> u32 { self.h }
}
