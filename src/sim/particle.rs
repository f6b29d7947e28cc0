//! Short-lived visual particles (ball debris, snake sparks, orb fragments)
//!
//! Each entity owns its own `Particles` container and advances it once per
//! tick. Particles never affect gameplay.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// A single particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in ticks
    pub life: u32,
    /// Life at spawn (for fading)
    pub max_life: u32,
    pub color: Rgb,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: u32, color: Rgb) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            color,
        }
    }

    /// Opacity in [0, 1], fading linearly with remaining life
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Owned, self-pruning particle list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particles {
    items: Vec<Particle>,
    /// Spawns beyond this count are dropped
    capacity: usize,
}

impl Particles {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Add a particle unless the container is full
    pub fn spawn(&mut self, particle: Particle) {
        if self.items.len() < self.capacity {
            self.items.push(particle);
        }
    }

    /// Move every particle one tick, apply `gravity` to vertical velocity,
    /// and drop the expired ones
    pub fn advance(&mut self, gravity: f32) {
        for p in &mut self.items {
            p.pos += p.vel;
            p.vel.y += gravity;
            p.life = p.life.saturating_sub(1);
        }
        self.items.retain(|p| p.life > 0);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE;

    #[test]
    fn test_particles_expire() {
        let mut particles = Particles::with_capacity(8);
        particles.spawn(Particle::new(Vec2::ZERO, Vec2::X, 2, WHITE));
        particles.spawn(Particle::new(Vec2::ZERO, Vec2::Y, 30, WHITE));

        particles.advance(0.0);
        assert_eq!(particles.len(), 2);
        particles.advance(0.0);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles.as_slice()[0].pos, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_gravity_bends_path() {
        let mut particles = Particles::with_capacity(1);
        particles.spawn(Particle::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 30, WHITE));
        particles.advance(0.2);
        particles.advance(0.2);
        let p = particles.as_slice()[0];
        // First step moves before gravity applies
        assert!((p.pos - Vec2::new(2.0, 0.2)).length() < 1e-6);
        assert!((p.vel.y - 0.4).abs() < 1e-6);
        assert!((p.alpha() - 28.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_capacity_caps_spawns() {
        let mut particles = Particles::with_capacity(3);
        for _ in 0..10 {
            particles.spawn(Particle::new(Vec2::ZERO, Vec2::ZERO, 5, WHITE));
        }
        assert_eq!(particles.len(), 3);
    }
}
