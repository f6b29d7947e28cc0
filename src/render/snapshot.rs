//! Read-only per-frame view of a session
//!
//! Everything a renderer needs to draw one frame, copied out of the session
//! so drawing never borrows simulation state.

use glam::Vec2;
use serde::Serialize;

use crate::color::{self, Rgb};
use crate::sim::orb::OrbState;
use crate::sim::particle::Particle;
use crate::sim::perimeter::BorderSide;
use crate::sim::starfield::Star;
use crate::sim::state::GameSession;

pub const LIFE_BANNER: &str = "+1 LIFE";
pub const GET_READY: &str = "GET READY!";
pub const GAME_OVER: &str = "GAME OVER";
pub const RESTART_HINT: &str = "PRESS SPACE TO RESTART";
/// Red wash drawn over the arena during the countdown
pub const COUNTDOWN_OVERLAY: (Rgb, u8) = (color::DARK_RED, 50);

#[derive(Debug, Clone, Serialize)]
pub struct OrbView {
    pub pos: Vec2,
    pub shake_offset: Vec2,
    pub radius: f32,
    pub display_radius: f32,
    pub alpha: u8,
    pub color: Rgb,
    pub glow_radius: f32,
    pub state: &'static str,
    /// Explosion or implosion progress, 0 otherwise
    pub progress: f32,
    pub light_pos: Vec2,
    /// Light factor per degree
    pub occlusion: Vec<f32>,
    pub particles: Vec<Particle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaddleView {
    pub side: BorderSide,
    pub segments: Vec<Vec2>,
    pub color: Rgb,
    pub glow: f32,
    pub particles: Vec<Particle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub debris: Vec<Particle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub level: u32,
    pub level_text: String,
    pub score: u64,
    /// Zero-padded to five digits
    pub score_text: String,
    pub score_color: Rgb,
    pub high_score: u64,
    /// One heart per remaining life
    pub hearts: u32,
    /// Big countdown digit, while it is above zero
    pub countdown: Option<u32>,
    pub get_ready: bool,
    pub life_banner: bool,
    pub game_over: bool,
    /// Full-screen tint and its alpha
    pub overlay: Option<(Rgb, u8)>,
}

impl Hud {
    /// Text lines to draw on top of the arena, top to bottom
    pub fn messages(&self) -> Vec<&'static str> {
        let mut lines = Vec::new();
        if self.life_banner {
            lines.push(LIFE_BANNER);
        }
        if self.get_ready {
            lines.push(GET_READY);
        }
        if self.game_over {
            lines.push(GAME_OVER);
            lines.push(RESTART_HINT);
        }
        lines
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub background: Rgb,
    pub stars: Vec<Star>,
    pub orb: OrbView,
    pub paddles: Vec<PaddleView>,
    pub ball: BallView,
    pub hud: Hud,
}

impl FrameSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        let orb = &session.orb;
        let progress = match orb.state() {
            OrbState::Exploding { progress } | OrbState::Imploding { progress } => progress,
            _ => 0.0,
        };
        let countdown = session.countdown_remaining_secs().filter(|&secs| secs > 0);

        Self {
            tick: session.time_ticks,
            background: orb.display_background(),
            stars: session.starfield.stars().to_vec(),
            orb: OrbView {
                pos: orb.pos,
                shake_offset: orb.shake_offset,
                radius: orb.radius,
                display_radius: orb.display_radius(),
                alpha: orb.display_alpha(),
                color: session.orb_color,
                glow_radius: orb.glow_radius,
                state: orb.state().name(),
                progress,
                light_pos: orb.light_pos(),
                occlusion: orb.occlusion().as_slice().to_vec(),
                particles: orb.particles.as_slice().to_vec(),
            },
            paddles: session
                .paddles
                .iter()
                .map(|p| PaddleView {
                    side: p.side(),
                    segments: p.segments().to_vec(),
                    color: color::WHITE,
                    glow: p.glow,
                    particles: p.particles.as_slice().to_vec(),
                })
                .collect(),
            ball: BallView {
                pos: session.ball.pos,
                radius: session.ball.radius,
                color: session.ball.color(),
                debris: session.ball.debris.as_slice().to_vec(),
            },
            hud: Hud {
                level: session.level,
                level_text: format!("LVL {}", session.level),
                score: session.score,
                score_text: format!("{:05}", session.score),
                score_color: color::SCORE_BLUE,
                high_score: session.high_score,
                hearts: session.lives,
                countdown,
                get_ready: countdown.is_some(),
                life_banner: session.banner_visible(),
                game_over: session.is_game_over(),
                overlay: session.countdown_active().then_some(COUNTDOWN_OVERLAY),
            },
        }
    }
}
