//! The central orb
//!
//! State machine:
//! - Idle: shake decays, glow breathes, debris drifts
//! - Trapping: the ball orbits inside the orb for two revolutions, then the
//!   orb explodes and lets go
//! - Exploding: the orb swells and fades while the background blends toward
//!   the next level's color, which is committed at the end
//! - Imploding: the orb shrinks, then starts a fresh explosion
//!
//! The orb also keeps a per-degree light map: how much of the fixed light
//! reaches each point of its rim once snake bodies cast their shadows.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::ball::Ball;
use super::collision::ray_segment_intersection;
use super::particle::{Particle, Particles};
use crate::color::{INITIAL_BACKGROUND, Rgb};
use crate::consts::{ORB_RADIUS, PARTICLE_LIFETIME};
use crate::settings::Settings;
use crate::{arena_center, polar_to_cartesian, random_direction};

/// Orbit angle advanced per tick while trapping
const ORBIT_STEP: f32 = 0.2;
/// Two full revolutions
const ORBIT_END: f32 = 2.0 * TAU;
/// Trapped ball orbit, relative to the orb radius
const ORBIT_RADIUS_FACTOR: f32 = 0.8;
const TRAP_SHAKE: f32 = 15.0;
const HIT_SHAKE: f32 = 10.0;
const SHAKE_DECAY: f32 = 0.9;
const EXPLOSION_STEP: f32 = 0.02;
const IMPLOSION_STEP: f32 = 0.04;
/// Debris pieces per hit
pub const HIT_PARTICLES: usize = 10;
/// Strongest shadow a snake can cast (fraction of light removed)
pub const MAX_SHADOW: f32 = 0.7;

/// Orb animation state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrbState {
    Idle,
    Trapping { orbit_phase: f32 },
    Exploding { progress: f32 },
    Imploding { progress: f32 },
}

impl OrbState {
    pub fn name(&self) -> &'static str {
        match self {
            OrbState::Idle => "idle",
            OrbState::Trapping { .. } => "trapping",
            OrbState::Exploding { .. } => "exploding",
            OrbState::Imploding { .. } => "imploding",
        }
    }
}

/// Light reaching the orb rim, one entry per whole degree
///
/// 1.0 is fully lit; a snake shadow can bring it down to `1 - MAX_SHADOW`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcclusionMap {
    light: Vec<f32>,
}

impl Default for OcclusionMap {
    fn default() -> Self {
        Self { light: vec![1.0; 360] }
    }
}

impl OcclusionMap {
    /// Light factor at a whole degree (wraps)
    pub fn light_at(&self, degree: usize) -> f32 {
        self.light[degree % 360]
    }

    /// Light factor for an angle in radians (screen orientation, y down)
    pub fn light_at_angle(&self, theta: f32) -> f32 {
        let degree = theta.to_degrees().rem_euclid(360.0) as usize;
        self.light_at(degree)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.light
    }

    /// True when no shadow falls anywhere on the rim
    pub fn is_fully_lit(&self) -> bool {
        self.light.iter().all(|&l| l >= 1.0)
    }
}

/// The central orb entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentralOrb {
    pub pos: Vec2,
    pub radius: f32,
    pub shake_amount: f32,
    /// Jitter applied when drawing, re-rolled every tick
    pub shake_offset: Vec2,
    /// Breathing halo radius
    pub glow_radius: f32,
    state: OrbState,
    background: Rgb,
    pending_background: Option<Rgb>,
    /// Light position relative to the orb center
    light_offset: Vec2,
    occlusion: OcclusionMap,
    pub particles: Particles,
}

impl CentralOrb {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: arena_center(),
            radius: ORB_RADIUS,
            shake_amount: 0.0,
            shake_offset: Vec2::ZERO,
            glow_radius: ORB_RADIUS,
            state: OrbState::Idle,
            background: INITIAL_BACKGROUND,
            pending_background: None,
            light_offset: Vec2::splat(-ORB_RADIUS * 1.5),
            occlusion: OcclusionMap::default(),
            particles: Particles::with_capacity(settings.max_particles()),
        }
    }

    pub fn state(&self) -> OrbState {
        self.state
    }

    /// Whether a ball is currently held in orbit
    pub fn is_trapping(&self) -> bool {
        matches!(self.state, OrbState::Trapping { .. })
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn pending_background(&self) -> Option<Rgb> {
        self.pending_background
    }

    /// Background to draw this frame, blending toward the pending color
    /// while exploding
    pub fn display_background(&self) -> Rgb {
        match (self.state, self.pending_background) {
            (OrbState::Exploding { progress }, Some(next)) => self.background.lerp(next, progress),
            _ => self.background,
        }
    }

    /// Radius to draw this frame
    pub fn display_radius(&self) -> f32 {
        match self.state {
            OrbState::Exploding { progress } => self.radius * (1.0 + progress * 2.0),
            OrbState::Imploding { progress } => self.radius * (1.0 - progress * 0.5),
            _ => self.radius,
        }
    }

    /// Opacity to draw this frame
    pub fn display_alpha(&self) -> u8 {
        match self.state {
            OrbState::Exploding { progress } => (255.0 * (1.0 - progress)).clamp(0.0, 255.0) as u8,
            _ => 255,
        }
    }

    pub fn light_offset(&self) -> Vec2 {
        self.light_offset
    }

    pub fn light_pos(&self) -> Vec2 {
        self.pos + self.light_offset
    }

    pub fn occlusion(&self) -> &OcclusionMap {
        &self.occlusion
    }

    /// Capture the ball: it orbits inside the orb until the explosion
    pub fn trap_ball(&mut self) {
        if !matches!(self.state, OrbState::Idle) {
            log::debug!("Orb trap interrupts {} state", self.state.name());
        }
        self.state = OrbState::Trapping { orbit_phase: 0.0 };
        self.shake_amount = TRAP_SHAKE;
    }

    /// Advance one tick; `ball` is only touched while trapping
    pub fn update<R: Rng + ?Sized>(&mut self, ball: &mut Ball, sim_time: f32, rng: &mut R) {
        if let OrbState::Trapping { orbit_phase } = self.state {
            let phase = orbit_phase + ORBIT_STEP;
            self.state = OrbState::Trapping { orbit_phase: phase };
            ball.pos = polar_to_cartesian(self.pos, self.radius * ORBIT_RADIUS_FACTOR, phase);
            self.shake_amount = TRAP_SHAKE * (1.0 + phase.sin());

            if phase >= ORBIT_END {
                log::debug!("Orb releases trapped ball");
                self.start_explosion(rng);
            }
        } else {
            self.shake_amount *= SHAKE_DECAY;
            if self.shake_amount < 0.01 {
                self.shake_amount = 0.0;
            }
            self.glow_radius = self.radius + 5.0 * (sim_time * 4.0).sin();
            self.particles.advance(0.0);

            match self.state {
                OrbState::Exploding { progress } => {
                    let progress = progress + EXPLOSION_STEP;
                    if progress >= 1.0 {
                        self.state = OrbState::Idle;
                        if let Some(next) = self.pending_background.take() {
                            self.background = next;
                        }
                        log::debug!("Orb explosion finished, background {:?}", self.background);
                    } else {
                        self.state = OrbState::Exploding { progress };
                    }
                }
                OrbState::Imploding { progress } => {
                    let progress = progress + IMPLOSION_STEP;
                    if progress >= 1.0 {
                        self.start_explosion(rng);
                    } else {
                        self.state = OrbState::Imploding { progress };
                    }
                }
                _ => {}
            }
        }

        self.shake_offset = if self.shake_amount > 0.0 {
            let s = self.shake_amount;
            Vec2::new(rng.random_range(-s..=s), rng.random_range(-s..=s))
        } else {
            Vec2::ZERO
        };
    }

    /// Begin an explosion and pick the next level's background
    pub fn start_explosion<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        // Dark, leaning blue for a space feel
        self.pending_background = Some(Rgb::new(
            rng.random_range(0..=20),
            rng.random_range(0..=20),
            rng.random_range(20..=40),
        ));
        self.state = OrbState::Exploding { progress: 0.0 };
    }

    /// Begin an implosion; ignored while a ball is trapped
    pub fn start_implosion(&mut self) {
        if self.is_trapping() {
            log::warn!("Implosion requested while trapping a ball, ignoring");
            return;
        }
        self.state = OrbState::Imploding { progress: 0.0 };
    }

    /// React to a ball contact: shake and shed debris
    pub fn hit<R: Rng + ?Sized>(&mut self, color: Rgb, rng: &mut R) {
        self.shake_amount = HIT_SHAKE;
        for _ in 0..HIT_PARTICLES {
            let speed: f32 = rng.random_range(2.0..5.0);
            let vel = random_direction(rng) * speed;
            self.particles.spawn(Particle::new(self.pos, vel, PARTICLE_LIFETIME, color));
        }
    }

    /// Recompute the light map from snake bodies
    ///
    /// For every degree of the rim, a ray runs from the light to the rim
    /// point. The nearest body segment crossing it before the rim shades that
    /// degree: fully at the segment's middle, fading to nothing at its ends.
    pub fn calculate_light_occlusion<'a>(&mut self, bodies: impl IntoIterator<Item = &'a [Vec2]>) {
        let bodies: Vec<&[Vec2]> = bodies.into_iter().collect();
        let light = self.light_pos();

        for (degree, slot) in self.occlusion.light.iter_mut().enumerate() {
            let rim = polar_to_cartesian(self.pos, self.radius, (degree as f32).to_radians());
            let to_rim = rim - light;
            let ray_len = to_rim.length();
            let Some(dir) = to_rim.try_normalize() else {
                *slot = 1.0;
                continue;
            };

            let mut nearest: Option<(f32, f32)> = None;
            for pair in bodies.iter().flat_map(|body| body.windows(2)) {
                if let Some((t, u)) = ray_segment_intersection(light, dir, pair[0], pair[1])
                    && t < ray_len
                    && nearest.is_none_or(|(best, _)| t < best)
                {
                    nearest = Some((t, u));
                }
            }

            let shadow = nearest.map_or(0.0, |(_, u)| (1.0 - ((u - 0.5).abs() * 2.0).min(1.0)) * MAX_SHADOW);
            *slot = 1.0 - shadow;
        }
    }
}
