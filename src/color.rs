//! Colors shared by the simulation and the render contract

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend toward `other`; `t` is clamped to [0, 1]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BRIGHT_GREEN: Rgb = Rgb::new(0, 255, 0);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const DARK_RED: Rgb = Rgb::new(139, 0, 0);
/// HUD score color
pub const SCORE_BLUE: Rgb = Rgb::new(0, 150, 255);
/// Dark blue space before the first explosion
pub const INITIAL_BACKGROUND: Rgb = Rgb::new(0, 0, 20);

/// Spark colors for snake impacts
pub const SPARK_PALETTE: [Rgb; 4] = [
    Rgb::new(255, 255, 200), // Bright yellow
    Rgb::new(255, 200, 150), // Orange
    Rgb::new(200, 255, 255), // Cyan
    WHITE,
];

/// Orb color for a level-progress ratio (hits / hits required)
///
/// Green fades to yellow over the first half, then yellow darkens to dark red.
pub fn level_progress_color(progress: f32) -> Rgb {
    let progress = progress.clamp(0.0, 1.0);
    if progress < 0.5 {
        let ratio = progress * 2.0;
        Rgb::new((255.0 * ratio) as u8, 255, 0)
    } else {
        let ratio = (progress - 0.5) * 2.0;
        Rgb::new(
            (139.0 + (255.0 - 139.0) * (1.0 - ratio)) as u8,
            (255.0 * (1.0 - ratio)) as u8,
            0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_color_endpoints() {
        assert_eq!(level_progress_color(0.0), BRIGHT_GREEN);
        assert_eq!(level_progress_color(0.5), YELLOW);
        assert_eq!(level_progress_color(1.0), DARK_RED);
    }

    #[test]
    fn test_progress_color_midway() {
        // 3 of 10 hits: 60% of the way from green to yellow
        let c = level_progress_color(0.3);
        assert_eq!(c.g, 255);
        assert_eq!(c.r, 153);
        assert_eq!(c.b, 0);
    }

    #[test]
    fn test_lerp() {
        let a = Rgb::new(0, 0, 20);
        let b = Rgb::new(20, 10, 40);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(10, 5, 30));
        assert_eq!(a.lerp(b, 3.0), b);
    }
}
