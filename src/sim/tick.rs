//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically, one frame per
//! call.

use super::collision::ball_out_of_bounds;
use super::paddle::Paddle;
use super::perimeter::{border_hit, perimeter_coord, perimeter_delta};
use super::state::{GameEvent, GamePhase, GameSession};
use crate::color::{self, level_progress_color};
use crate::secs_to_ticks;
use crate::settings::Settings;
use crate::sim::ball::BallTint;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Signed snake movement shared by all four snakes; positive is
    /// counter-clockwise
    pub paddle_delta: f32,
    /// Start a new round (only honoured after game over)
    pub restart: bool,
    /// Demo mode - steer the snakes automatically
    pub autopilot: bool,
}

impl TickInput {
    /// Map a held direction (-1, 0, +1) to snake movement
    pub fn keyboard(direction: i32, settings: &Settings) -> Self {
        Self {
            paddle_delta: direction.signum() as f32 * settings.paddle_speed,
            ..Default::default()
        }
    }
}

/// Advance the session by one tick
pub fn tick(session: &mut GameSession, input: &TickInput) {
    session.events.clear();

    // Nothing moves after game over
    if session.is_game_over() {
        if input.restart {
            session.restart();
        }
        return;
    }

    session.time_ticks += 1;
    let sim_time = session.sim_time();

    session.starfield.update(&mut session.rng);
    session.orb.update(&mut session.ball, sim_time, &mut session.rng);

    let delta = if input.autopilot {
        autopilot_delta(session)
    } else {
        input.paddle_delta
    };
    if delta != 0.0 {
        for paddle in &mut session.paddles {
            paddle.move_by(delta);
        }
    }

    match session.phase {
        GamePhase::Countdown { started_tick } => {
            if session.time_ticks - started_tick >= secs_to_ticks(session.settings.countdown_secs) {
                session.phase = GamePhase::Playing;
                session.ball.tint = BallTint::Normal;
                session.events.push(GameEvent::CountdownFinished);
            }
        }
        GamePhase::Playing => advance_ball(session),
        _ => {}
    }

    match session.phase {
        GamePhase::LevelTransition if !session.orb.is_trapping() => commit_level_up(session),
        GamePhase::Playing => {
            check_paddle_hits(session);
            check_ball_out(session);
        }
        _ => {}
    }

    if session.banner_started.is_some() && !session.banner_visible() {
        session.banner_started = None;
    }

    session.ball.update_effects();
    for paddle in &mut session.paddles {
        paddle.update_effects();
    }
    session
        .orb
        .calculate_light_occlusion(session.paddles.iter().map(Paddle::segments));
}

/// Move the ball and score an orb contact
fn advance_ball(session: &mut GameSession) {
    if !session.ball.advance(&mut session.rng) {
        return;
    }

    session.orb.hit(session.orb_color, &mut session.rng);
    session.hits_this_level += 1;
    let required = session.settings.hits_per_level;
    session.orb_color = level_progress_color(session.hits_this_level as f32 / required as f32);
    session.add_score(100 * u64::from(session.level));
    session.events.push(GameEvent::OrbHit);
    log::debug!(
        "Orb hit {}/{} (score {})",
        session.hits_this_level,
        required,
        session.score
    );

    if session.hits_this_level >= required {
        start_level_transition(session);
    }
}

/// Trap the ball in the orb and award the level-clear life
fn start_level_transition(session: &mut GameSession) {
    session.phase = GamePhase::LevelTransition;
    session.orb.trap_ball();
    session.lives += 1;
    session.banner_started = Some(session.time_ticks);
    session.events.push(GameEvent::LifeAdded);
    log::info!("Level {} cleared, lives now {}", session.level, session.lives);
}

/// The orb let the ball go: move to the next level
fn commit_level_up(session: &mut GameSession) {
    session.level += 1;
    session.hits_this_level = 0;
    session.orb_color = color::BRIGHT_GREEN;
    if session.settings.speed_up_on_level_up {
        session.ball.increase_speed();
    }
    session.ball.reset(&mut session.rng);
    session.start_countdown();
    session.events.push(GameEvent::LevelUp { level: session.level });
    log::info!(
        "Level {} (ball speed {:.2}, repel speed {:.2})",
        session.level,
        session.ball.speed,
        session.ball.repel_speed
    );
}

/// Bounce off the first snake touched
fn check_paddle_hits(session: &mut GameSession) {
    let ball = &mut session.ball;
    let rng = &mut session.rng;
    let hit = session
        .paddles
        .iter_mut()
        .find_map(|paddle| ball.collide_with_paddle(paddle, rng).then(|| paddle.side()));

    if let Some(side) = hit {
        session.add_score(10 * u64::from(session.level));
        session.events.push(GameEvent::PaddleHit { side });
        log::debug!("Snake hit on {:?}", side);
    }
}

/// Lose a life when the ball leaves the arena
fn check_ball_out(session: &mut GameSession) {
    if !ball_out_of_bounds(session.ball.pos, session.ball.radius) {
        return;
    }

    session.lives = session.lives.saturating_sub(1);
    session.events.push(GameEvent::LifeLost {
        lives_left: session.lives,
    });
    log::debug!("Ball lost at {}, {} lives left", session.ball.pos, session.lives);

    if session.lives == 0 {
        session.phase = GamePhase::GameOver;
        session.events.push(GameEvent::GameOver { score: session.score });
        log::info!(
            "Game over at level {} with score {} (high score {})",
            session.level,
            session.score,
            session.high_score
        );
        return;
    }

    session.ball.tint = BallTint::LostLife;
    session.ball.add_debris(color::DARK_RED, &mut session.rng);
    session.ball.reset(&mut session.rng);
    session.start_countdown();
}

/// Demo steering: slide the nearest snake toward where the ball is headed
fn autopilot_delta(session: &GameSession) -> f32 {
    let Some((side, progress)) = border_hit(session.ball.pos, session.ball.vel) else {
        return 0.0;
    };
    let target = perimeter_coord(side, progress);

    let nearest = session
        .paddles
        .iter()
        .map(|paddle| perimeter_delta(paddle.center_coord(), target))
        .min_by(|a, b| a.abs().total_cmp(&b.abs()));

    // `move_by` scales by 1/100 of a side
    let max = session.settings.paddle_speed;
    nearest.map_or(0.0, |d| (d * 100.0).clamp(-max, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena_center;
    use crate::sim::orb::OrbState;
    use crate::sim::perimeter::BorderSide;
    use glam::Vec2;

    fn session(seed: u64) -> GameSession {
        GameSession::new(seed, Settings::default())
    }

    #[test]
    fn test_first_tick_moves_ball() {
        let mut s = session(1);
        let before = s.ball.pos;
        tick(&mut s, &TickInput::default());
        assert_eq!(s.time_ticks, 1);
        assert!((s.ball.pos - before).length() > 4.9);
    }

    #[test]
    fn test_keyboard_input_moves_all_snakes() {
        let mut s = session(2);
        let input = TickInput::keyboard(1, &s.settings);
        assert_eq!(input.paddle_delta, 5.0);
        assert_eq!(TickInput::keyboard(-3, &s.settings).paddle_delta, -5.0);

        tick(&mut s, &input);
        for paddle in &s.paddles {
            assert!((paddle.progress() - 0.30).abs() < 1e-5);
        }
    }

    #[test]
    fn test_orb_contact_scores() {
        let mut s = session(3);
        s.ball.pos = arena_center() + Vec2::new(10.0, 0.0);
        s.ball.moving_inward = true;
        tick(&mut s, &TickInput::default());

        assert_eq!(s.hits_this_level, 1);
        assert_eq!(s.score, 100);
        assert_eq!(s.events(), &[GameEvent::OrbHit]);
        assert_eq!(s.orb.particles.len(), crate::sim::orb::HIT_PARTICLES);
        assert!(s.orb.shake_amount > 0.0);
    }

    #[test]
    fn test_level_transition_and_level_up() {
        let mut s = session(4);
        s.hits_this_level = 9;
        s.level = 2;
        s.ball.pos = arena_center() + Vec2::new(0.0, 10.0);
        s.ball.moving_inward = true;
        tick(&mut s, &TickInput::default());

        assert_eq!(s.phase, GamePhase::LevelTransition);
        assert_eq!(s.lives, 4);
        assert_eq!(s.score, 200);
        assert!(s.orb.is_trapping());
        assert!(s.banner_visible());
        assert_eq!(s.events(), &[GameEvent::OrbHit, GameEvent::LifeAdded]);

        let mut ticks = 0;
        while s.level_transition_active() {
            tick(&mut s, &TickInput::default());
            ticks += 1;
            assert!(ticks < 200, "level transition never finished");
        }
        assert_eq!(s.level, 3);
        assert_eq!(s.hits_this_level, 0);
        assert_eq!(s.orb_color, color::BRIGHT_GREEN);
        assert!(s.countdown_active());
        assert!(matches!(s.orb.state(), OrbState::Exploding { .. }));
        assert!((s.ball.speed - 5.5).abs() < 1e-4);
        assert_eq!(s.events(), &[GameEvent::LevelUp { level: 3 }]);
    }

    #[test]
    fn test_level_up_without_speed_up() {
        let settings = Settings {
            speed_up_on_level_up: false,
            ..Default::default()
        };
        let mut s = GameSession::new(5, settings);
        s.hits_this_level = 9;
        s.ball.pos = arena_center();
        s.ball.moving_inward = true;
        for _ in 0..200 {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(s.level, 2);
        assert_eq!(s.ball.speed, 5.0);
    }

    #[test]
    fn test_out_of_bounds_costs_a_life() {
        let mut s = session(6);
        s.ball.pos = Vec2::new(-20.0, 50.0);
        s.ball.vel = Vec2::new(-1.0, 0.0);
        s.ball.moving_inward = false;
        tick(&mut s, &TickInput::default());

        assert_eq!(s.lives, 2);
        assert_eq!(s.events(), &[GameEvent::LifeLost { lives_left: 2 }]);
        assert!(s.countdown_active());
        assert_eq!(s.ball.tint, BallTint::LostLife);
        assert_eq!(s.ball.debris.len(), crate::sim::ball::DEBRIS_COUNT);
        assert!(s.ball.moving_inward);
    }

    #[test]
    fn test_countdown_freezes_ball() {
        let mut s = session(7);
        s.start_countdown();
        let parked = s.ball.pos;

        for _ in 0..179 {
            tick(&mut s, &TickInput::default());
            assert_eq!(s.ball.pos, parked);
        }
        assert!(s.countdown_active());

        tick(&mut s, &TickInput::default());
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.ball.tint, BallTint::Normal);
        assert!(s.events().contains(&GameEvent::CountdownFinished));
    }

    #[test]
    fn test_game_over_halts_until_restart() {
        let mut s = session(8);
        s.lives = 1;
        s.add_score(450);
        s.ball.pos = Vec2::new(400.0, 50.0);
        s.ball.moving_inward = false;
        tick(&mut s, &TickInput::default());

        assert!(s.is_game_over());
        assert_eq!(s.lives, 0);
        assert_eq!(
            s.events(),
            &[GameEvent::LifeLost { lives_left: 0 }, GameEvent::GameOver { score: 450 }]
        );

        let frozen = s.time_ticks;
        let ball = s.ball.pos;
        for _ in 0..10 {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(s.time_ticks, frozen);
        assert_eq!(s.ball.pos, ball);
        assert!(s.events().is_empty());

        tick(
            &mut s,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.lives, 3);
        assert_eq!(s.score, 0);
        assert_eq!(s.high_score, 450);
        assert_eq!(s.events(), &[GameEvent::Restarted]);
    }

    #[test]
    fn test_paddle_hit_scores_by_level() {
        let mut s = session(9);
        s.level = 3;
        s.ball.pos = Vec2::new(180.0, 630.0);
        s.ball.vel = Vec2::new(0.0, 1.0);
        s.ball.moving_inward = false;
        tick(&mut s, &TickInput::default());

        assert_eq!(s.score, 30);
        assert_eq!(s.events(), &[GameEvent::PaddleHit { side: BorderSide::Bottom }]);
        assert!(s.ball.moving_inward);
        assert_eq!(s.paddles[0].glow, 0.9);
    }

    #[test]
    fn test_ball_on_snake_scores_every_playing_tick() {
        let mut s = session(11);
        s.ball.pos = Vec2::new(180.0, 640.0);
        s.ball.aim_at_center(&mut s.rng);
        assert!(s.ball.moving_inward);
        tick(&mut s, &TickInput::default());

        assert_eq!(s.score, 10);
        assert_eq!(s.events(), &[GameEvent::PaddleHit { side: BorderSide::Bottom }]);
        assert_eq!(s.paddles[0].glow, 0.9);

        // Still within reach on the way in: the bounce counts again
        tick(&mut s, &TickInput::default());
        assert_eq!(s.score, 20);
    }

    #[test]
    fn test_autopilot_steers_toward_heading() {
        let mut s = session(10);
        // Heading straight down at x = 300: bottom snake centre sits at x = 180
        s.ball.pos = Vec2::new(300.0, 500.0);
        s.ball.vel = Vec2::new(0.0, 5.0);
        let delta = autopilot_delta(&s);
        assert_eq!(delta, 5.0);

        // Already lined up
        s.ball.pos = Vec2::new(180.0, 500.0);
        assert!(autopilot_delta(&s).abs() < 1e-3);

        s.ball.pos = Vec2::new(-30.0, 500.0);
        assert_eq!(autopilot_delta(&s), 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = session(99999);
        let mut b = session(99999);
        let inputs = [
            TickInput::keyboard(1, &a.settings),
            TickInput::default(),
            TickInput {
                autopilot: true,
                ..Default::default()
            },
        ];

        for i in 0..3000 {
            let input = &inputs[(i / 100) % inputs.len()];
            tick(&mut a, input);
            tick(&mut b, input);
            assert_eq!(a.events(), b.events());
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.orb.background(), b.orb.background());
    }
}
