//! Collision detection against polyline snakes and the arena bounds
//!
//! Snakes are ordered point lists; the ball is tested against each consecutive
//! pair as a line segment. The orb lighting reuses the ray/segment test.

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Segments shorter than this are treated as missing
const DEGENERATE_SEGMENT_LEN_SQ: f32 = 1e-8;

/// Result of a ball-vs-polyline check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Index of the first point of the colliding segment
    pub segment: usize,
    /// Closest point on the segment to the ball center
    pub point: Vec2,
    /// Distance from the ball center to `point`
    pub distance: f32,
}

/// Closest point on segment `a`-`b` to `p`, or `None` for a zero-length segment
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Option<Vec2> {
    let line_vec = b - a;
    let line_len_sq = line_vec.length_squared();
    if line_len_sq < DEGENERATE_SEGMENT_LEN_SQ {
        return None;
    }

    let t = ((p - a).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    Some(a + line_vec * t)
}

/// First segment of `points` whose distance to `center` is within `reach`
///
/// Segments are tested in order and the first qualifying one wins. Fewer than
/// two points never collide.
pub fn ball_polyline_collision(center: Vec2, reach: f32, points: &[Vec2]) -> Option<SegmentHit> {
    points.windows(2).enumerate().find_map(|(i, pair)| {
        let closest = closest_point_on_segment(center, pair[0], pair[1])?;
        let distance = center.distance(closest);
        (distance <= reach).then_some(SegmentHit {
            segment: i,
            point: closest,
            distance,
        })
    })
}

/// Intersect the ray `origin + dir * t` with segment `a`-`b`
///
/// Returns `(t, u)` where `t` is the ray parameter (in units of `dir`) and
/// `u` in [0, 1] is the position along the segment. Parallel lines and hits
/// behind the origin are `None`.
pub fn ray_segment_intersection(origin: Vec2, dir: Vec2, a: Vec2, b: Vec2) -> Option<(f32, f32)> {
    let seg = b - a;
    let denom = dir.perp_dot(seg);
    if denom.abs() <= 1e-4 {
        return None;
    }

    let to_a = a - origin;
    let t = to_a.perp_dot(seg) / denom;
    let u = to_a.perp_dot(dir) / denom;
    (t > 0.0 && (0.0..=1.0).contains(&u)).then_some((t, u))
}

/// Whether the ball has left the arena by more than its radius
pub fn ball_out_of_bounds(pos: Vec2, radius: f32) -> bool {
    pos.x < -radius || pos.x > ARENA_WIDTH + radius || pos.y < -radius || pos.y > ARENA_HEIGHT + radius
}

/// Whether the ball center has reached the orb core
#[inline]
pub fn ball_orb_contact(pos: Vec2, orb_center: Vec2, contact_radius: f32) -> bool {
    pos.distance(orb_center) <= contact_radius
}
