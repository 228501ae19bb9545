// canvas.rs - Surface over a 2D canvas context
//
// Canvas calls that fail (bad gradient, detached context) skip that
// shape and carry on with the frame.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::render::{Rgba, Surface};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn circle(&self, x: f32, y: f32, radius: f32) -> bool {
        self.ctx.begin_path();
        self.ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU).is_ok()
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, w: f32, h: f32) {
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba, width: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(x0 as f64, y0 as f64);
        self.ctx.line_to(x1 as f64, y1 as f64);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn radial(&mut self, x: f32, y: f32, radius: f32, stops: &[(f32, Rgba)]) {
        let (x, y) = (x as f64, y as f64);
        let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, radius as f64) else {
            return;
        };
        for (offset, color) in stops {
            if gradient.add_color_stop(*offset, &color.css()).is_err() {
                return;
            }
        }

        if self.circle(x as f32, y as f32, radius) {
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.fill();
        }
    }

    fn disc(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        if self.circle(x, y, radius) {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.fill();
        }
    }
}
