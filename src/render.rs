// render.rs - Turn field state into draw calls
//
// The simulation never touches a canvas directly. It talks to a `Surface`,
// implemented by the browser 2D context (web/canvas.rs) and by the raster
// used for PNG previews (bin/field2png).
//
// Per node:
//   glow  = radial gradient, radius * GLOW_SCALE, accent fading to clear
//   core  = solid disc at the node radius
// Per link:
//   1px accent line, alpha = (1 - d / max) * LINK_ALPHA

use crate::config::{GLOW_SCALE, LINK_ALPHA, LINK_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS colour string, as the 2D context wants it
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const ACCENT: Rgba = Rgba::new(0, 180, 216, 1.0);
pub const CORE: Rgba = Rgba::new(13, 79, 92, 1.0);

/// (offset, colour) stops for the node glow, centre outwards
pub const GLOW_STOPS: [(f32, Rgba); 3] = [
    (0.0, ACCENT.with_alpha(0.8)),
    (0.5, ACCENT.with_alpha(0.3)),
    (1.0, ACCENT.with_alpha(0.0)),
];

pub trait Surface {
    /// Wipe the whole w x h area
    fn clear(&mut self, w: f32, h: f32);

    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba, width: f32);

    /// Disc of `radius` filled with a radial gradient from the centre
    fn radial(&mut self, x: f32, y: f32, radius: f32, stops: &[(f32, Rgba)]);

    fn disc(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
}

/// Opacity factor for a link: 1 when touching, 0 at `max` and beyond
#[inline]
pub fn link_alpha(distance: f32, max: f32) -> f32 {
    if distance >= max { return 0.0; }
    1.0 - distance / max
}

pub struct Painter;

impl Painter {
    pub fn link<S: Surface + ?Sized>(s: &mut S, a: (f32, f32), b: (f32, f32), distance: f32, max: f32) {
        let alpha = link_alpha(distance, max) * LINK_ALPHA;
        s.line(a.0, a.1, b.0, b.1, ACCENT.with_alpha(alpha), LINK_WIDTH);
    }

    pub fn node<S: Surface + ?Sized>(s: &mut S, x: f32, y: f32, r: f32) {
        s.radial(x, y, r * GLOW_SCALE, &GLOW_STOPS);
        s.disc(x, y, r, CORE);
    }
}

#[cfg(test)]
pub(crate) mod record {
    use super::{Rgba, Surface};

    #[derive(Clone, Debug, PartialEq)]
    pub enum Call {
        Clear { w: f32, h: f32 },
        Line { x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba },
        Radial { x: f32, y: f32, radius: f32 },
        Disc { x: f32, y: f32, radius: f32 },
    }

    /// Surface that just remembers what it was asked to draw
    #[derive(Default)]
    pub struct Recorder {
        pub calls: Vec<Call>,
    }

    impl Recorder {
        pub fn lines(&self) -> impl Iterator<Item = &Call> {
            self.calls.iter().filter(|c| matches!(c, Call::Line { .. }))
        }

        pub fn discs(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, Call::Disc { .. })).count()
        }
    }

    impl Surface for Recorder {
        fn clear(&mut self, w: f32, h: f32) {
            self.calls.push(Call::Clear { w, h });
        }

        fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba, _width: f32) {
            self.calls.push(Call::Line { x0, y0, x1, y1, color });
        }

        fn radial(&mut self, x: f32, y: f32, radius: f32, _stops: &[(f32, Rgba)]) {
            self.calls.push(Call::Radial { x, y, radius });
        }

        fn disc(&mut self, x: f32, y: f32, radius: f32, _color: Rgba) {
            self.calls.push(Call::Disc { x, y, radius });
        }
    }
}
