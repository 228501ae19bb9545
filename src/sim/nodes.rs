// nodes.rs - Drifting field nodes
//
// Structure-of-Arrays layout for cache-friendly iteration.
// The set is rebuilt wholesale on resize, never grown in place.

use super::{NodeField, Pointer};
use crate::config::{MAX_SPEED, MIN_RADIUS, REPEL_STRENGTH, Regime, SPAWN_SPEED};

pub struct Nodes {
    // Position
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Velocity
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    // Radius, fixed at spawn
    pub r: Vec<f32>,
}

impl Nodes {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            vx: Vec::new(),
            vy: Vec::new(),
            r: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.vx.clear();
        self.vy.clear();
        self.r.clear();
    }

    /// Replace the whole set with `count` fresh nodes inside w x h
    pub fn respawn(&mut self, count: usize, w: f32, h: f32, regime: &Regime, rng: &mut u32) {
        self.clear();
        self.x.reserve(count);
        self.y.reserve(count);
        self.vx.reserve(count);
        self.vy.reserve(count);
        self.r.reserve(count);

        for _ in 0..count {
            self.x.push(NodeField::rand(rng) * w);
            self.y.push(NodeField::rand(rng) * h);
            self.vx.push((NodeField::rand(rng) - 0.5) * SPAWN_SPEED);
            self.vy.push((NodeField::rand(rng) - 0.5) * SPAWN_SPEED);
            self.r.push(MIN_RADIUS + NodeField::rand(rng) * regime.base_radius);
        }
    }

    /// Move node i one frame: integrate, bounce, repel, cap speed
    pub fn advance(&mut self, i: usize, w: f32, h: f32, pointer: Pointer, regime: &Regime) {
        self.x[i] += self.vx[i];
        self.y[i] += self.vy[i];

        // Reflect only, no clamp - nodes may overshoot for a frame
        if self.x[i] < 0.0 || self.x[i] > w { self.vx[i] = -self.vx[i]; }
        if self.y[i] < 0.0 || self.y[i] > h { self.vy[i] = -self.vy[i]; }

        let dx = pointer.x - self.x[i];
        let dy = pointer.y - self.y[i];
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > 0.0 && dist < regime.interaction_radius {
            self.vx[i] -= dx / dist * REPEL_STRENGTH;
            self.vy[i] -= dy / dist * REPEL_STRENGTH;
        }

        let speed = (self.vx[i] * self.vx[i] + self.vy[i] * self.vy[i]).sqrt();
        if speed > MAX_SPEED {
            self.vx[i] = self.vx[i] / speed * MAX_SPEED;
            self.vy[i] = self.vy[i] / speed * MAX_SPEED;
        }
    }

    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        let dx = self.x[a] - self.x[b];
        let dy = self.y[a] - self.y[b];
        (dx * dx + dy * dy).sqrt()
    }

    pub fn speed(&self, i: usize) -> f32 {
        (self.vx[i] * self.vx[i] + self.vy[i] * self.vy[i]).sqrt()
    }
}

impl Default for Nodes {
    fn default() -> Self {
        Self::new()
    }
}
