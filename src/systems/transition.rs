//! Transition timing system
//!
//! Measures frame time and drives the controller once per frame.

use std::time::Instant;
use curtains_core::{CurtainsSink, TransitionController};

/// Feeds capped frame deltas to a [`TransitionController`]
pub struct TransitionSystem {
    last_frame: Instant,
    max_dt: f32,
}

impl TransitionSystem {
    /// Create a system that never advances more than `max_dt` seconds per frame
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_dt: max_dt.max(0.0),
        }
    }

    /// Run one frame and return the delta that was applied
    pub fn update<S: CurtainsSink>(&mut self, controller: &mut TransitionController<S>) -> f32 {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        let dt = self.cap(raw_dt);
        controller.advance(dt);
        dt
    }

    /// Restart the frame clock, so the next update does not count idle time
    pub fn reset_clock(&mut self) {
        self.last_frame = Instant::now();
    }

    fn cap(&self, raw_dt: f32) -> f32 {
        raw_dt.min(self.max_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curtains_core::{MaterialParams, Preset};

    #[test]
    fn test_dt_is_capped() {
        let system = TransitionSystem::new(0.1);
        assert_eq!(system.cap(5.0), 0.1);
        assert_eq!(system.cap(0.016), 0.016);
    }

    #[test]
    fn test_negative_cap_clamped() {
        let system = TransitionSystem::new(-1.0);
        assert_eq!(system.cap(0.5), 0.0);
    }

    #[test]
    fn test_update_advances_controller() {
        let mut system = TransitionSystem::new(0.1);
        let mut controller = TransitionController::new(MaterialParams::default());
        controller.play(&Preset::new().with_duration(10.0)).unwrap();

        let dt = system.update(&mut controller);
        assert!(dt >= 0.0 && dt <= 0.1);
        assert!(!controller.is_finished());
    }
}
