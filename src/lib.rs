//! Orbital Pong - a ball bounces between a central orb and four border snakes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, snakes, orb, starfield, session)
//! - `render`: Render-collaborator contract (frame snapshot, lit-sphere shading)
//! - `settings`: Data-driven game tuning

pub mod color;
pub mod render;
pub mod settings;
pub mod sim;

pub use color::Rgb;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per displayed frame at 60 Hz)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Host frame deltas above this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions (portrait, origin top-left, y down)
    pub const ARENA_WIDTH: f32 = 360.0;
    pub const ARENA_HEIGHT: f32 = 640.0;

    pub const BALL_RADIUS: f32 = 15.0;
    pub const PADDLE_THICKNESS: f32 = 15.0;
    pub const ORB_RADIUS: f32 = 50.0;

    /// Base outward speed of the starfield
    pub const STAR_SPEED: f32 = 2.0;

    /// Lifetime of every debris/spark particle, in ticks
    pub const PARTICLE_LIFETIME: u32 = 30;
}

/// Center of the arena (orb position, ball target)
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH / 2.0, consts::ARENA_HEIGHT / 2.0)
}

/// Whole simulation ticks covering `secs` seconds
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    (secs.max(0.0) * consts::TICKS_PER_SECOND as f32).round() as u64
}

/// Convert polar (r, theta) around `origin` to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(origin: Vec2, r: f32, theta: f32) -> Vec2 {
    origin + Vec2::from_angle(theta) * r
}

/// Uniformly distributed unit vector
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU))
}

/// Unit vector from `from` toward `to`, or a random one if the points coincide
pub fn direction_or_random<R: Rng + ?Sized>(from: Vec2, to: Vec2, rng: &mut R) -> Vec2 {
    match (to - from).try_normalize() {
        Some(dir) => dir,
        None => {
            log::warn!("Zero-length direction at {from}, picking a random heading");
            random_direction(rng)
        }
    }
}
