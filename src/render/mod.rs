//! Render collaborator contract
//!
//! Frame snapshots for whatever draws the game, plus CPU shading of the lit
//! orb sphere.

pub mod lit_sphere;
pub mod snapshot;

pub use lit_sphere::{Rgba, SphereImage, orb_sphere, shade_lit_sphere};
pub use snapshot::{BallView, FrameSnapshot, Hud, OrbView, PaddleView};
