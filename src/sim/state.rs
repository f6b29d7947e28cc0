//! Session state and core simulation types
//!
//! A `GameSession` owns every entity for one round. `tick` in `tick.rs`
//! advances it; everything else reads it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::orb::CentralOrb;
use super::paddle::Paddle;
use super::perimeter::BorderSide;
use super::starfield::Starfield;
use crate::color::{self, Rgb};
use crate::consts::TICKS_PER_SECOND;
use crate::secs_to_ticks;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in flight
    Playing,
    /// "GET READY!" pause after a lost life or a level-up; no ball physics
    Countdown { started_tick: u64 },
    /// Ball trapped in the orb, waiting for the explosion to release it
    LevelTransition,
    /// Out of lives; only a restart moves on
    GameOver,
}

/// Gameplay events raised during a single tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    OrbHit,
    PaddleHit { side: BorderSide },
    LifeLost { lives_left: u32 },
    LifeAdded,
    LevelUp { level: u32 },
    CountdownFinished,
    GameOver { score: u64 },
    Restarted,
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameSession {
    pub settings: Settings,
    /// Source of all randomness in the session
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub ball: Ball,
    /// One snake per side, in `BorderSide::ALL` order
    pub paddles: [Paddle; 4],
    pub orb: CentralOrb,
    pub starfield: Starfield,
    pub lives: u32,
    pub level: u32,
    pub score: u64,
    pub high_score: u64,
    pub hits_this_level: u32,
    /// Orb tint, tracking progress through the level
    pub orb_color: Rgb,
    /// Tick the "+1 LIFE" banner appeared
    pub banner_started: Option<u64>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Fresh round: 3 lives, level 1, score 0
    pub fn new(seed: u64, settings: Settings) -> Self {
        let settings = settings.validated();
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::new(&settings, &mut rng);
        let paddles = BorderSide::ALL.map(|side| Paddle::new(side, &settings));
        let starfield = Starfield::new(settings.star_count(), &mut rng);
        let mut orb = CentralOrb::new(&settings);
        orb.calculate_light_occlusion(paddles.iter().map(Paddle::segments));

        log::info!(
            "New session (seed {}, {} lives, {} hits per level, quality {})",
            seed,
            settings.initial_lives,
            settings.hits_per_level,
            settings.quality.as_str()
        );

        Self {
            rng,
            time_ticks: 0,
            phase: GamePhase::Playing,
            ball,
            paddles,
            orb,
            starfield,
            lives: settings.initial_lives,
            level: 1,
            score: 0,
            high_score: 0,
            hits_this_level: 0,
            orb_color: color::BRIGHT_GREEN,
            banner_started: None,
            events: Vec::new(),
            settings,
        }
    }

    /// Fresh round carrying over a high score from an earlier one
    pub fn with_high_score(seed: u64, settings: Settings, high_score: u64) -> Self {
        let mut session = Self::new(seed, settings);
        session.high_score = high_score;
        session
    }

    /// Rebuild the round after a game over, keeping high score and settings
    ///
    /// Returns false (and changes nothing) while the game is still running.
    pub fn restart(&mut self) -> bool {
        if !self.is_game_over() {
            return false;
        }

        let seed = self.rng.random::<u64>();
        log::info!("Restarting (high score {})", self.high_score);
        *self = Self::with_high_score(seed, self.settings.clone(), self.high_score);
        self.events.push(GameEvent::Restarted);
        true
    }

    /// Add points and keep the high score current
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }

    /// Seconds of simulated time since the round began
    pub fn sim_time(&self) -> f32 {
        self.time_ticks as f32 / TICKS_PER_SECOND as f32
    }

    pub fn countdown_active(&self) -> bool {
        matches!(self.phase, GamePhase::Countdown { .. })
    }

    pub fn level_transition_active(&self) -> bool {
        self.phase == GamePhase::LevelTransition
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Ticks since the countdown began, if one is running
    pub fn countdown_elapsed_ticks(&self) -> Option<u64> {
        match self.phase {
            GamePhase::Countdown { started_tick } => Some(self.time_ticks.saturating_sub(started_tick)),
            _ => None,
        }
    }

    /// Whole seconds left to show ("3", "2", "1"); 0 once the last second
    /// has begun to run out
    pub fn countdown_remaining_secs(&self) -> Option<u32> {
        self.countdown_elapsed_ticks().map(|elapsed| {
            let total = self.settings.countdown_secs.ceil() as u64;
            let elapsed_secs = elapsed / u64::from(TICKS_PER_SECOND);
            total.saturating_sub(elapsed_secs) as u32
        })
    }

    /// Whether the "+1 LIFE" banner is on screen
    pub fn banner_visible(&self) -> bool {
        self.banner_started
            .is_some_and(|start| self.time_ticks.saturating_sub(start) < secs_to_ticks(self.settings.banner_secs))
    }

    /// Events raised by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Enter the countdown starting now
    pub(crate) fn start_countdown(&mut self) {
        self.phase = GamePhase::Countdown {
            started_tick: self.time_ticks,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::new(42, Settings::default());
        assert_eq!(session.lives, 3);
        assert_eq!(session.level, 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.orb_color, color::BRIGHT_GREEN);
        assert_eq!(session.starfield.len(), 200);
        for (paddle, side) in session.paddles.iter().zip(BorderSide::ALL) {
            assert_eq!(paddle.side(), side);
            assert_eq!(paddle.progress(), 0.25);
        }
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_add_score_tracks_high_score() {
        let mut session = GameSession::with_high_score(1, Settings::default(), 500);
        session.add_score(300);
        assert_eq!(session.high_score, 500);
        session.add_score(300);
        assert_eq!(session.score, 600);
        assert_eq!(session.high_score, 600);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut session = GameSession::new(2, Settings::default());
        session.add_score(1234);
        assert!(!session.restart());
        assert_eq!(session.score, 1234);

        session.phase = GamePhase::GameOver;
        session.lives = 0;
        assert!(session.restart());
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 1234);
        assert_eq!(session.lives, 3);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.events(), &[GameEvent::Restarted]);
    }

    #[test]
    fn test_countdown_remaining() {
        let mut session = GameSession::new(3, Settings::default());
        assert_eq!(session.countdown_remaining_secs(), None);

        session.start_countdown();
        assert_eq!(session.countdown_remaining_secs(), Some(3));
        session.time_ticks += 59;
        assert_eq!(session.countdown_remaining_secs(), Some(3));
        session.time_ticks += 1;
        assert_eq!(session.countdown_remaining_secs(), Some(2));
        session.time_ticks += 120;
        assert_eq!(session.countdown_remaining_secs(), Some(0));
    }

    #[test]
    fn test_banner_window() {
        let mut session = GameSession::new(4, Settings::default());
        assert!(!session.banner_visible());
        session.banner_started = Some(session.time_ticks);
        assert!(session.banner_visible());
        session.time_ticks += 119;
        assert!(session.banner_visible());
        session.time_ticks += 1;
        assert!(!session.banner_visible());
    }
}
