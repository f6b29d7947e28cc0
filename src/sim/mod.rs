//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (snakes in `BorderSide::ALL` order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod clock;
pub mod collision;
pub mod orb;
pub mod paddle;
pub mod particle;
pub mod perimeter;
pub mod starfield;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallTint};
pub use clock::FixedTimestep;
pub use collision::{SegmentHit, ball_out_of_bounds, ball_polyline_collision, ray_segment_intersection};
pub use orb::{CentralOrb, OcclusionMap, OrbState};
pub use paddle::Paddle;
pub use particle::{Particle, Particles};
pub use perimeter::{BorderSide, border_point, wrap_progress};
pub use starfield::{Star, Starfield};
pub use state::{GameEvent, GamePhase, GameSession};
pub use tick::{TickInput, tick};
