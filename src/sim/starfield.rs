//! Decorative parallax starfield
//!
//! Stars stream outward from the arena center; nearer stars (small `depth`)
//! move faster. Nothing here touches gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arena_center;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, STAR_SPEED};

/// A single star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Parallax depth, 1 (near) to 10 (far)
    pub depth: u8,
    /// Drawn size in pixels, 1 to 3
    pub size: u8,
    pub speed: f32,
}

impl Star {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let depth = rng.random_range(1..=10u8);
        Self {
            pos: Vec2::new(rng.random_range(0.0..=ARENA_WIDTH), rng.random_range(0.0..=ARENA_HEIGHT)),
            depth,
            size: rng.random_range(1..=3),
            speed: STAR_SPEED * f32::from(11 - depth) / 2.0,
        }
    }

    /// Move one tick outward, re-spawning at the center or off screen
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(dir) = (self.pos - arena_center()).try_normalize() else {
            *self = Star::spawn(rng);
            return;
        };

        self.pos += dir * self.speed;
        if !(0.0..=ARENA_WIDTH).contains(&self.pos.x) || !(0.0..=ARENA_HEIGHT).contains(&self.pos.y) {
            *self = Star::spawn(rng);
        }
    }
}

/// The background star collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        Self {
            stars: (0..count).map(|_| Star::spawn(rng)).collect(),
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for star in &mut self.stars {
            star.advance(rng);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = Starfield::new(200, &mut rng);
        assert_eq!(field.len(), 200);
        for star in field.stars() {
            assert!((1..=10).contains(&star.depth));
            assert!((1..=3).contains(&star.size));
            assert_eq!(star.speed, STAR_SPEED * (11 - star.depth) as f32 / 2.0);
        }
    }

    #[test]
    fn test_star_moves_outward() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut star = Star::spawn(&mut rng);
        star.pos = arena_center() + Vec2::new(10.0, 0.0);
        star.speed = 2.0;
        star.advance(&mut rng);
        assert!((star.pos - (arena_center() + Vec2::new(12.0, 0.0))).length() < 1e-5);
    }

    #[test]
    fn test_star_at_center_respawns() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut star = Star::spawn(&mut rng);
        star.pos = arena_center();
        star.advance(&mut rng);
        assert!(star.pos.is_finite());
        assert!((1..=10).contains(&star.depth));
    }

    #[test]
    fn test_stars_stay_on_screen() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut field = Starfield::new(50, &mut rng);
        for _ in 0..500 {
            field.update(&mut rng);
        }
        for star in field.stars() {
            assert!((0.0..=ARENA_WIDTH).contains(&star.pos.x));
            assert!((0.0..=ARENA_HEIGHT).contains(&star.pos.y));
        }
    }
}
