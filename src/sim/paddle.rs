//! Snakes: paddles that slide along the arena border
//!
//! A snake's position is its leading edge as (side, progress). Its body is a
//! polyline of evenly spaced samples walked forward along the border, so it
//! bends around corners.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particle::{Particle, Particles};
use super::perimeter::{BorderSide, border_point, perimeter_coord, wrap_progress};
use crate::color::SPARK_PALETTE;
use crate::consts::PARTICLE_LIFETIME;
use crate::settings::Settings;

/// Sparks spawned per impact
pub const SPARK_COUNT: usize = 15;
/// Downward pull on sparks, per tick
pub const SPARK_GRAVITY: f32 = 0.2;
/// Glow multiplier per tick
const GLOW_DECAY: f32 = 0.9;

/// A border-sliding paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Side holding the leading edge
    side: BorderSide,
    /// Leading edge position along `side`, in [0, 1)
    progress: f32,
    /// Body length as a fraction of one side
    length: f32,
    samples: usize,
    segments: Vec<Vec2>,
    /// Impact glow in [0, 1]
    pub glow: f32,
    pub particles: Particles,
}

impl Paddle {
    /// Snake centred on `side`
    pub fn new(side: BorderSide, settings: &Settings) -> Self {
        let length = settings.paddle_length;
        let mut paddle = Self {
            side,
            progress: (1.0 - length) / 2.0,
            length,
            samples: settings.paddle_samples.max(2),
            segments: Vec::new(),
            glow: 0.0,
            particles: Particles::with_capacity(settings.max_particles()),
        };
        paddle.generate_segments();
        paddle
    }

    pub fn side(&self) -> BorderSide {
        self.side
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Body sample points, ordered from the leading edge forward
    pub fn segments(&self) -> &[Vec2] {
        &self.segments
    }

    /// Place the leading edge, wrapping across sides as needed
    pub fn set_position(&mut self, side: BorderSide, progress: f32) {
        (self.side, self.progress) = wrap_progress(side, progress);
        self.generate_segments();
    }

    /// Slide along the border; positive moves counter-clockwise
    pub fn move_by(&mut self, delta: f32) {
        self.set_position(self.side, self.progress + delta / 100.0);
    }

    /// Perimeter coordinate in [0, 4) of the middle of the body
    pub fn center_coord(&self) -> f32 {
        (perimeter_coord(self.side, self.progress) + self.length / 2.0).rem_euclid(4.0)
    }

    fn generate_segments(&mut self) {
        let last = (self.samples - 1) as f32;
        self.segments.clear();
        self.segments.extend((0..self.samples).map(|i| {
            let p = self.progress + (i as f32 / last) * self.length;
            let (side, p) = wrap_progress(self.side, p);
            border_point(side, p)
        }));
        debug_assert_eq!(self.segments.len(), self.samples);
    }

    /// Flash and throw sparks into the arena from `pos`
    pub fn add_impact_effect<R: Rng + ?Sized>(&mut self, pos: Vec2, rng: &mut R) {
        self.glow = 1.0;

        // Semicircle opening away from the paddle's edge
        let normal = self.side.inward_normal();
        let base = normal.y.atan2(normal.x);
        for _ in 0..SPARK_COUNT {
            let angle = base + rng.random_range(-std::f32::consts::FRAC_PI_2..=std::f32::consts::FRAC_PI_2);
            let speed: f32 = rng.random_range(3.0..8.0);
            let color = SPARK_PALETTE[rng.random_range(0..SPARK_PALETTE.len())];
            self.particles
                .spawn(Particle::new(pos, Vec2::from_angle(angle) * speed, PARTICLE_LIFETIME, color));
        }
    }

    /// Advance sparks and fade the glow
    pub fn update_effects(&mut self) {
        self.particles.advance(SPARK_GRAVITY);
        self.glow *= GLOW_DECAY;
        if self.glow < 0.01 {
            self.glow = 0.0;
        }
    }
}
