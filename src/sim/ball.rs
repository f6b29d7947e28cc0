//! The ball: inward/outward motion, orb repulsion and snake bounces

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{ball_orb_contact, ball_polyline_collision};
use super::paddle::Paddle;
use super::particle::{Particle, Particles};
use super::perimeter::BorderSide;
use crate::color::{self, Rgb};
use crate::consts::*;
use crate::settings::Settings;
use crate::{arena_center, direction_or_random, random_direction};

/// Debris pieces spawned by `add_debris`
pub const DEBRIS_COUNT: usize = 10;

/// Ball tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallTint {
    Normal,
    /// Shown during the countdown after a lost life
    LostLife,
}

impl BallTint {
    pub fn rgb(self) -> Rgb {
        match self {
            BallTint::Normal => color::WHITE,
            BallTint::LostLife => color::DARK_RED,
        }
    }
}

/// The ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Speed toward the center after a snake bounce
    pub speed: f32,
    /// Speed away from the center after an orb contact
    pub repel_speed: f32,
    max_speed: f32,
    max_repel_speed: f32,
    speed_increase: f32,
    /// True until the ball reaches the orb, then false until a snake bounce
    pub moving_inward: bool,
    pub tint: BallTint,
    pub debris: Particles,
}

impl Ball {
    /// Create a ball at a random border position, aimed at the center
    pub fn new<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            speed: settings.ball_speed,
            repel_speed: settings.repel_speed,
            max_speed: settings.max_ball_speed,
            max_repel_speed: settings.max_repel_speed,
            speed_increase: settings.speed_increase,
            moving_inward: true,
            tint: BallTint::Normal,
            debris: Particles::with_capacity(settings.max_particles()),
        };
        ball.reset(rng);
        ball
    }

    /// Respawn on a random border point and aim at the arena center
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let side = BorderSide::from_index(rng.random_range(0..4));
        self.pos = match side {
            BorderSide::Bottom => Vec2::new(rng.random_range(0.0..=ARENA_WIDTH), ARENA_HEIGHT),
            BorderSide::Right => Vec2::new(ARENA_WIDTH, rng.random_range(0.0..=ARENA_HEIGHT)),
            BorderSide::Top => Vec2::new(rng.random_range(0.0..=ARENA_WIDTH), 0.0),
            BorderSide::Left => Vec2::new(0.0, rng.random_range(0.0..=ARENA_HEIGHT)),
        };
        self.aim_at_center(rng);
    }

    /// Point the velocity at the arena center with magnitude `speed`
    pub fn aim_at_center<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.vel = direction_or_random(self.pos, arena_center(), rng) * self.speed;
        self.moving_inward = true;
    }

    /// Raise both speeds by the speed-up factor, up to their caps
    pub fn increase_speed(&mut self) {
        self.speed = (self.speed * self.speed_increase).min(self.max_speed);
        self.repel_speed = (self.repel_speed * self.speed_increase).min(self.max_repel_speed);
    }

    /// Advance one tick. Returns true on orb contact.
    ///
    /// Contact happens once per inward approach: the ball is flung out in a
    /// random direction at `repel_speed` without moving this tick.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.moving_inward && ball_orb_contact(self.pos, arena_center(), self.radius) {
            self.vel = random_direction(rng) * self.repel_speed;
            self.moving_inward = false;
            return true;
        }

        self.pos += self.vel;
        false
    }

    /// Bounce off `paddle` if touching any of its segments
    ///
    /// On contact the ball heads back to the center at `speed` and the paddle
    /// plays its impact effect at the closest point.
    pub fn collide_with_paddle<R: Rng + ?Sized>(&mut self, paddle: &mut Paddle, rng: &mut R) -> bool {
        let reach = self.radius + PADDLE_THICKNESS / 2.0;
        let Some(hit) = ball_polyline_collision(self.pos, reach, paddle.segments()) else {
            return false;
        };

        self.aim_at_center(rng);
        paddle.add_impact_effect(hit.point, rng);
        true
    }

    /// Burst of debris at the ball's position
    pub fn add_debris<R: Rng + ?Sized>(&mut self, color: Rgb, rng: &mut R) {
        for _ in 0..DEBRIS_COUNT {
            let speed: f32 = rng.random_range(2.0..5.0);
            let vel = random_direction(rng) * speed;
            self.debris.spawn(Particle::new(self.pos, vel, PARTICLE_LIFETIME, color));
        }
    }

    /// Advance debris one tick
    pub fn update_effects(&mut self) {
        self.debris.advance(0.0);
    }

    pub fn color(&self) -> Rgb {
        self.tint.rgb()
    }
}
