//! Fixed-timestep accumulator
//!
//! Hosts feed variable frame deltas; the clock hands back how many whole
//! simulation ticks to run. Large deltas are clamped and the tick count per
//! frame is capped so a stall never turns into a catch-up spiral.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a host frame delta (seconds) and return the ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            // Drop the backlog
            self.accumulator %= SIM_DT;
        }
        ticks
    }

    /// Fraction of a tick left over
    ///
    /// Render hosts use it to interpolate between the last two ticks; the
    /// headless runner only logs it.
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_60hz_frame() {
        let mut clock = FixedTimestep::new();
        let total: u32 = (0..60).map(|_| clock.advance(SIM_DT + 1e-6)).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_slow_frames_accumulate() {
        let mut clock = FixedTimestep::new();
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        assert!((clock.alpha() - 0.5).abs() < 1e-4);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut clock = FixedTimestep::new();
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        assert!(clock.alpha() < 1.0);
        assert_eq!(clock.advance(-1.0), 0);
    }
}
