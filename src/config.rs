// config.rs - Field tuning
//
// Two parameter sets, picked by viewport width. Everything else is shared.

/// Viewports narrower than this use the mobile regime.
pub const MOBILE_BREAKPOINT: u32 = 768;

// Motion
pub const SPAWN_SPEED: f32 = 0.5; // initial vx/vy in [-0.25, 0.25)
pub const REPEL_STRENGTH: f32 = 0.02;
pub const MAX_SPEED: f32 = 1.0;

// Radius floor; the regime adds up to `base_radius` on top.
pub const MIN_RADIUS: f32 = 1.5;

// Rendering
pub const GLOW_SCALE: f32 = 3.0;
pub const LINK_ALPHA: f32 = 0.4;
pub const LINK_WIDTH: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Regime {
    pub density: u32,
    pub base_radius: f32,
    pub interaction_radius: f32,
    pub max_distance: f32,
}

pub const DESKTOP: Regime = Regime {
    density: 15_000,
    base_radius: 2.0,
    interaction_radius: 100.0,
    max_distance: 150.0,
};

pub const MOBILE: Regime = Regime {
    density: 14_000,
    base_radius: 1.5,
    interaction_radius: 80.0,
    max_distance: 110.0,
};

impl Regime {
    pub fn for_width(w: u32) -> Self {
        if w < MOBILE_BREAKPOINT { MOBILE } else { DESKTOP }
    }

    pub fn is_mobile(&self) -> bool {
        *self == MOBILE
    }

    /// floor(w * h / density)
    pub fn node_count(&self, w: u32, h: u32) -> usize {
        (w as u64 * h as u64 / self.density as u64) as usize
    }
}

/// Particle count for a viewport, regime chosen from its width.
pub fn node_count(w: u32, h: u32) -> usize {
    Regime::for_width(w).node_count(w, h)
}
