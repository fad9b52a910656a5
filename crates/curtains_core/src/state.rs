//! Live state of the playing transition
//!
//! [`TransitionState`] holds a copy of the preset that started the current
//! transition together with the time left to run. It is overwritten on every
//! successful play; nothing about earlier transitions is retained.

use crate::color::Color;
use crate::curve::{AnimationCurve, Curve};
use crate::preset::{Preset, TextureRef};

/// Fraction of the duration still left at which a transition counts as done
///
/// Frame deltas such as `1/60` are not exact in binary, so summing exactly
/// `duration` seconds of them can leave a remainder of a few ulps.
const COMPLETION_TOLERANCE: f64 = 1e-5;

/// Curve values produced by one [`TransitionState::advance`] step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSample {
    /// Progress the curves were evaluated at
    pub progress: f32,
    /// Value of the cutoff curve
    pub cutoff: f32,
    /// Value of the fade curve
    pub fade: f32,
}

/// The single running transition instance
#[derive(Clone, Debug)]
pub struct TransitionState {
    duration: f32,
    /// Seconds consumed so far, accumulated in f64 to keep long runs exact
    elapsed: f64,
    cutoff_curve: AnimationCurve,
    fade_curve: AnimationCurve,
    reversed: bool,
    distort: bool,
    color: Color,
    texture: Option<TextureRef>,
    finished: bool,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionState {
    /// Create an idle state
    pub fn new() -> Self {
        Self {
            duration: 0.0,
            elapsed: 0.0,
            cutoff_curve: AnimationCurve::default(),
            fade_curve: AnimationCurve::default(),
            reversed: false,
            distort: false,
            color: Color::default(),
            texture: None,
            finished: true,
        }
    }

    /// Overwrite every field from `preset` and start running
    ///
    /// The duration is not checked here.
    pub fn copy_from(&mut self, preset: &Preset) {
        self.duration = preset.duration;
        self.elapsed = 0.0;

        self.cutoff_curve = preset.cutoff_curve.clone();
        self.fade_curve = preset.fade_curve.clone();

        self.reversed = preset.reversed;
        self.distort = preset.distort;
        self.color = preset.color;
        self.texture = preset.texture.clone();

        self.finished = false;
    }

    /// Normalized progress in `[0, 1]`
    ///
    /// Runs from 0 to 1 as time elapses, or from 1 to 0 when reversed.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.reversed { 0.0 } else { 1.0 };
        }

        let remaining = (self.remaining() / self.duration as f64).clamp(0.0, 1.0) as f32;
        if self.reversed {
            remaining
        } else {
            1.0 - remaining
        }
    }

    /// Step the transition by `dt` seconds
    ///
    /// Time is consumed first, then both curves are evaluated on the new
    /// progress, and only then is the transition marked finished if no time
    /// is left. The step that runs out of time therefore still reports the
    /// boundary values of the curves.
    ///
    /// A remainder within a small fraction of the duration counts as no time
    /// left, and is snapped to zero so the final step samples the curve ends.
    pub fn advance(&mut self, dt: f32) -> CurveSample {
        self.elapsed += dt as f64;

        let done = self.remaining() <= self.duration as f64 * COMPLETION_TOLERANCE;
        if done {
            self.elapsed = self.elapsed.max(self.duration as f64);
        }

        let progress = self.progress();
        let sample = CurveSample {
            progress,
            cutoff: self.cutoff_curve.evaluate(progress),
            fade: self.fade_curve.evaluate(progress),
        };

        if done {
            self.finished = true;
        }

        sample
    }

    /// True if no transition is progressing
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stop the transition, abandoning any time left
    pub fn mark_finished(&mut self) {
        self.finished = true;
    }

    /// Length of the transition in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds left to run, negative after an overshooting last step
    pub fn time_remaining(&self) -> f32 {
        self.remaining() as f32
    }

    fn remaining(&self) -> f64 {
        self.duration as f64 - self.elapsed
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn distort(&self) -> bool {
        self.distort
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn texture(&self) -> Option<&TextureRef> {
        self.texture.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn linear_preset(duration: f32) -> Preset {
        Preset::new()
            .with_duration(duration)
            .with_cutoff_curve(AnimationCurve::linear(0.0, 0.0, 1.0, 1.0))
            .with_fade_curve(AnimationCurve::linear(0.0, 0.0, 1.0, 1.0))
    }

    #[test]
    fn test_new_state_is_finished() {
        let state = TransitionState::new();
        assert!(state.is_finished());
    }

    #[test]
    fn test_copy_from_resets_time_and_flag() {
        let mut state = TransitionState::new();
        let preset = linear_preset(2.0)
            .distorted(true)
            .with_color(Color::WHITE)
            .with_texture(TextureRef::new("textures/wipe.png"));
        state.copy_from(&preset);

        assert!(!state.is_finished());
        assert_eq!(state.duration(), 2.0);
        assert_eq!(state.time_remaining(), 2.0);
        assert!(state.distort());
        assert_eq!(state.color(), Color::WHITE);
        assert_eq!(state.texture(), Some(&TextureRef::new("textures/wipe.png")));
    }

    #[test]
    fn test_copy_from_is_a_copy() {
        let mut state = TransitionState::new();
        let mut preset = linear_preset(2.0);
        state.copy_from(&preset);

        preset.duration = 10.0;
        preset.reversed = true;
        preset.cutoff_curve = AnimationCurve::constant(0.0);

        assert_eq!(state.duration(), 2.0);
        assert!(!state.is_reversed());
        let sample = state.advance(1.0);
        assert!((sample.cutoff - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_progress_at_start() {
        let mut state = TransitionState::new();
        state.copy_from(&linear_preset(2.0));
        assert_eq!(state.progress(), 0.0);

        state.copy_from(&linear_preset(2.0).reversed(true));
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn test_advance_evaluates_updated_progress() {
        let mut state = TransitionState::new();
        state.copy_from(&linear_preset(2.0));

        let sample = state.advance(1.0);
        assert!((sample.progress - 0.5).abs() < EPSILON);
        assert!((sample.cutoff - 0.5).abs() < EPSILON);
        assert!((sample.fade - 0.5).abs() < EPSILON);
        assert!(!state.is_finished());
    }

    #[test]
    fn test_final_step_emits_boundary_then_finishes() {
        let mut state = TransitionState::new();
        state.copy_from(&linear_preset(2.0));
        state.advance(1.0);

        let sample = state.advance(1.0);
        assert_eq!(sample.progress, 1.0);
        assert!((sample.cutoff - 1.0).abs() < EPSILON);
        assert!((sample.fade - 1.0).abs() < EPSILON);
        assert!(state.is_finished());
    }

    #[test]
    fn test_overshoot_clamps_progress() {
        let mut state = TransitionState::new();
        state.copy_from(&linear_preset(1.0));

        let sample = state.advance(5.0);
        assert_eq!(sample.progress, 1.0);
        assert!(state.is_finished());
        // Decrement is unconditional
        assert!((state.time_remaining() + 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_reversed_runs_backwards() {
        let mut state = TransitionState::new();
        state.copy_from(&linear_preset(2.0).reversed(true));

        let sample = state.advance(0.5);
        assert!((sample.progress - 0.75).abs() < EPSILON);
        let sample = state.advance(1.5);
        assert_eq!(sample.progress, 0.0);
        assert!(state.is_finished());
    }

    #[test]
    fn test_progress_monotonic() {
        for reversed in [false, true] {
            let mut state = TransitionState::new();
            state.copy_from(&linear_preset(1.0).reversed(reversed));
            let mut last = state.progress();
            while !state.is_finished() {
                let p = state.advance(0.0625).progress;
                if reversed {
                    assert!(p <= last, "reversed progress went up: {} -> {}", last, p);
                } else {
                    assert!(p >= last, "progress went down: {} -> {}", last, p);
                }
                last = p;
            }
        }
    }

    #[test]
    fn test_inexact_frame_steps_finish_on_last_frame() {
        for (duration, frames) in [(2.0_f32, 120_u32), (1.0, 60), (1.5, 90), (0.3, 3), (1.0, 7)] {
            let mut state = TransitionState::new();
            state.copy_from(&linear_preset(duration));
            let dt = duration / frames as f32;

            for frame in 0..frames - 1 {
                state.advance(dt);
                assert!(!state.is_finished(), "d={} finished early at frame {}", duration, frame);
            }
            let sample = state.advance(dt);
            assert!(state.is_finished(), "d={} n={} still running", duration, frames);
            assert_eq!(sample.progress, 1.0);
            assert_eq!(sample.cutoff, 1.0);
        }
    }

    #[test]
    fn test_remainder_within_tolerance_counts_as_done() {
        let mut state = TransitionState::new();
        state.copy_from(&linear_preset(2.0));

        // 2e-6 of 2s left is below the tolerance
        state.advance(2.0 - 2e-6);
        assert!(state.is_finished());
        assert_eq!(state.time_remaining(), 0.0);
    }

    #[test]
    fn test_remainder_beyond_tolerance_keeps_running() {
        let mut state = TransitionState::new();
        state.copy_from(&linear_preset(2.0));

        // 1ms of 2s left is well above the tolerance
        let sample = state.advance(1.999);
        assert!(!state.is_finished());
        assert!(sample.progress < 1.0);
    }

    #[test]
    fn test_mark_finished() {
        let mut state = TransitionState::new();
        state.copy_from(&linear_preset(1.0));
        state.mark_finished();
        assert!(state.is_finished());
    }
}
