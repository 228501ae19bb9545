// raster.rs - Software Surface over an RGBA image
//
// Straight source-over blending, no antialiasing on lines. Good enough to
// eyeball a regime or a pointer position without a browser.

use image::{Rgba as Px, RgbaImage};
use node_field::{Rgba, Surface};

pub struct Raster {
    pub img: RgbaImage,
}

impl Raster {
    pub fn new(w: u32, h: u32) -> Self {
        Self { img: RgbaImage::new(w, h) }
    }

    /// Source-over `c` onto pixel (x, y), scaled by `coverage`
    fn blend(&mut self, x: i32, y: i32, c: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.img.width() || y as u32 >= self.img.height() {
            return;
        }
        let sa = (c.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 { return; }

        let dst = self.img.get_pixel_mut(x as u32, y as u32);
        let da = dst[3] as f32 / 255.0;
        let oa = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| {
            let s = s as f32 / 255.0;
            let d = d as f32 / 255.0;
            ((s * sa + d * da * (1.0 - sa)) / oa * 255.0).round() as u8
        };
        *dst = Px([mix(c.r, dst[0]), mix(c.g, dst[1]), mix(c.b, dst[2]), (oa * 255.0).round() as u8]);
    }

    /// Pixel bounds of a circle, clipped to the image
    fn bounds(&self, x: f32, y: f32, radius: f32) -> (i32, i32, i32, i32) {
        let x0 = ((x - radius).floor() as i32).max(0);
        let y0 = ((y - radius).floor() as i32).max(0);
        let x1 = ((x + radius).ceil() as i32).min(self.img.width() as i32 - 1);
        let y1 = ((y + radius).ceil() as i32).min(self.img.height() as i32 - 1);
        (x0, y0, x1, y1)
    }
}

/// Colour at `t` (0..=1) along gradient stops
pub fn sample(stops: &[(f32, Rgba)], t: f32) -> Rgba {
    let Some(&(first_t, first)) = stops.first() else {
        return Rgba::new(0, 0, 0, 0.0);
    };
    if t <= first_t { return first; }

    for pair in stops.windows(2) {
        let (t0, a) = pair[0];
        let (t1, b) = pair[1];
        if t <= t1 {
            let k = if t1 > t0 { (t - t0) / (t1 - t0) } else { 1.0 };
            let lerp = |p: u8, q: u8| (p as f32 + (q as f32 - p as f32) * k).round() as u8;
            return Rgba::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b), a.a + (b.a - a.a) * k);
        }
    }
    stops[stops.len() - 1].1
}

impl Surface for Raster {
    fn clear(&mut self, _w: f32, _h: f32) {
        for p in self.img.pixels_mut() {
            *p = Px([0, 0, 0, 0]);
        }
    }

    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba, width: f32) {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
        let coverage = width.min(1.0);
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            self.blend((x0 + dx * t).round() as i32, (y0 + dy * t).round() as i32, color, coverage);
        }
    }

    fn radial(&mut self, x: f32, y: f32, radius: f32, stops: &[(f32, Rgba)]) {
        if radius <= 0.0 { return; }
        let (x0, y0, x1, y1) = self.bounds(x, y, radius);
        for py in y0..=y1 {
            for px in x0..=x1 {
                let d = ((px as f32 + 0.5 - x).powi(2) + (py as f32 + 0.5 - y).powi(2)).sqrt();
                if d <= radius {
                    self.blend(px, py, sample(stops, d / radius), 1.0);
                }
            }
        }
    }

    fn disc(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        let (x0, y0, x1, y1) = self.bounds(x, y, radius + 1.0);
        for py in y0..=y1 {
            for px in x0..=x1 {
                let d = ((px as f32 + 0.5 - x).powi(2) + (py as f32 + 0.5 - y).powi(2)).sqrt();
                // soft one-pixel edge
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                self.blend(px, py, color, coverage);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node_field::render::{CORE, GLOW_STOPS};

    #[test]
    fn sample_hits_stops_and_midpoints() {
        assert_eq!(sample(&GLOW_STOPS, 0.0).a, 0.8);
        assert_eq!(sample(&GLOW_STOPS, 1.0).a, 0.0);
        assert!((sample(&GLOW_STOPS, 0.25).a - 0.55).abs() < 1e-6);
        assert_eq!(sample(&[], 0.5).a, 0.0);
    }

    #[test]
    fn disc_paints_centre_opaque() {
        let mut r = Raster::new(20, 20);
        r.disc(10.0, 10.0, 3.0, CORE);
        assert_eq!(*r.img.get_pixel(10, 10), Px([13, 79, 92, 255]));
        assert_eq!(r.img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn clear_wipes_everything() {
        let mut r = Raster::new(8, 8);
        r.disc(4.0, 4.0, 3.0, CORE);
        r.clear(8.0, 8.0);
        assert!(r.img.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn offscreen_shapes_are_clipped() {
        let mut r = Raster::new(8, 8);
        r.line(-50.0, -50.0, 100.0, 100.0, CORE, 1.0);
        r.radial(-20.0, 4.0, 6.0, &GLOW_STOPS);
        r.disc(40.0, 40.0, 2.0, CORE);
        assert_eq!(r.img.get_pixel(3, 3)[3], 255);
    }
}
