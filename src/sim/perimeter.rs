//! Border path geometry for the snakes
//!
//! A point on the arena border is a (side, progress) pair:
//! - side: which edge (bottom, right, top, left)
//! - progress: normalized position along that edge in [0, 1)
//!
//! Progress always increases counter-clockwise on screen, so walking forward
//! off the end of one side continues at progress 0 of the next.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// One of the four arena edges, in counter-clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderSide {
    Bottom,
    Right,
    Top,
    Left,
}

impl BorderSide {
    pub const ALL: [BorderSide; 4] = [
        BorderSide::Bottom,
        BorderSide::Right,
        BorderSide::Top,
        BorderSide::Left,
    ];

    pub fn index(self) -> usize {
        match self {
            BorderSide::Bottom => 0,
            BorderSide::Right => 1,
            BorderSide::Top => 2,
            BorderSide::Left => 3,
        }
    }

    /// Side at `index` mod 4
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Next side counter-clockwise
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous side (clockwise)
    pub fn prev(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Advance `steps` sides counter-clockwise (negative steps go clockwise)
    pub fn offset(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(4) as usize)
    }

    /// Unit normal pointing from this edge into the arena
    pub fn inward_normal(self) -> Vec2 {
        match self {
            BorderSide::Bottom => Vec2::new(0.0, -1.0),
            BorderSide::Right => Vec2::new(-1.0, 0.0),
            BorderSide::Top => Vec2::new(0.0, 1.0),
            BorderSide::Left => Vec2::new(1.0, 0.0),
        }
    }

    /// Length of this edge in arena units
    pub fn length(self) -> f32 {
        match self {
            BorderSide::Bottom | BorderSide::Top => ARENA_WIDTH,
            BorderSide::Right | BorderSide::Left => ARENA_HEIGHT,
        }
    }
}

/// Map a (side, progress) pair to a point on the arena border
#[inline]
pub fn border_point(side: BorderSide, progress: f32) -> Vec2 {
    match side {
        BorderSide::Bottom => Vec2::new(ARENA_WIDTH * progress, ARENA_HEIGHT),
        BorderSide::Right => Vec2::new(ARENA_WIDTH, ARENA_HEIGHT * (1.0 - progress)),
        BorderSide::Top => Vec2::new(ARENA_WIDTH * (1.0 - progress), 0.0),
        BorderSide::Left => Vec2::new(0.0, ARENA_HEIGHT * progress),
    }
}

/// Fold any progress value into [0, 1), rotating the side once per overflow
pub fn wrap_progress(side: BorderSide, progress: f32) -> (BorderSide, f32) {
    let turns = progress.floor();
    let mut side = side.offset(turns as i32);
    let mut progress = progress - turns;
    // Tiny negative inputs can round up to exactly 1.0
    if progress >= 1.0 {
        progress = 0.0;
        side = side.next();
    }
    (side, progress)
}

/// Continuous perimeter coordinate in [0, 4): side index plus progress
pub fn perimeter_coord(side: BorderSide, progress: f32) -> f32 {
    side.index() as f32 + progress
}

/// Signed shortest distance from `from` to `to` on the perimeter loop, in [-2, 2)
pub fn perimeter_delta(from: f32, to: f32) -> f32 {
    (to - from + 2.0).rem_euclid(4.0) - 2.0
}

/// Where a ray leaving `origin` along `dir` crosses the border, as (side, progress)
///
/// Returns `None` for a zero direction or an origin outside the arena.
pub fn border_hit(origin: Vec2, dir: Vec2) -> Option<(BorderSide, f32)> {
    if dir.length_squared() < 1e-12
        || origin.x < 0.0
        || origin.x > ARENA_WIDTH
        || origin.y < 0.0
        || origin.y > ARENA_HEIGHT
    {
        return None;
    }

    let mut best: Option<(f32, BorderSide)> = None;
    let mut consider = |t: f32, side: BorderSide| {
        if t >= 0.0 && best.is_none_or(|(bt, _)| t < bt) {
            best = Some((t, side));
        }
    };
    if dir.x > 0.0 {
        consider((ARENA_WIDTH - origin.x) / dir.x, BorderSide::Right);
    } else if dir.x < 0.0 {
        consider(-origin.x / dir.x, BorderSide::Left);
    }
    if dir.y > 0.0 {
        consider((ARENA_HEIGHT - origin.y) / dir.y, BorderSide::Bottom);
    } else if dir.y < 0.0 {
        consider(-origin.y / dir.y, BorderSide::Top);
    }

    let (t, side) = best?;
    let hit = origin + dir * t;
    let progress = match side {
        BorderSide::Bottom => hit.x / ARENA_WIDTH,
        BorderSide::Right => 1.0 - hit.y / ARENA_HEIGHT,
        BorderSide::Top => 1.0 - hit.x / ARENA_WIDTH,
        BorderSide::Left => hit.y / ARENA_HEIGHT,
    };
    Some(wrap_progress(side, progress.clamp(0.0, 1.0)))
}
